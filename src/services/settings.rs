use axum::extract::Multipart;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::settings::{Settings, UpdateSettingsRequest};

pub struct SettingsService;

impl SettingsService {
    pub async fn get(pool: &PgPool) -> anyhow::Result<Settings> {
        let settings =
            sqlx::query_as::<_, Settings>("SELECT * FROM settings WHERE id = 1")
                .fetch_one(pool)
                .await?;
        Ok(settings)
    }

    pub async fn update(pool: &PgPool, req: &UpdateSettingsRequest) -> anyhow::Result<Settings> {
        if let Some(email) = req.email_contact.as_deref() {
            if !email.contains('@') {
                anyhow::bail!("Adresse email invalide");
            }
        }

        let settings = sqlx::query_as::<_, Settings>(
            "UPDATE settings
             SET nom_application = COALESCE($1, nom_application),
                 devise          = COALESCE($2, devise),
                 adresse         = COALESCE($3, adresse),
                 telephone       = COALESCE($4, telephone),
                 email_contact   = COALESCE($5, email_contact),
                 updated_at      = NOW()
             WHERE id = 1
             RETURNING *",
        )
        .bind(&req.nom_application)
        .bind(&req.devise)
        .bind(&req.adresse)
        .bind(&req.telephone)
        .bind(&req.email_contact)
        .fetch_one(pool)
        .await?;
        Ok(settings)
    }

    /// Upload multipart des visuels : champs fichiers `logo` et/ou `hero`.
    /// Chaque fichier remplace le précédent (nom horodaté par UUID pour
    /// casser les caches navigateurs).
    pub async fn upload(
        pool: &PgPool,
        data_dir: &str,
        mut multipart: Multipart,
    ) -> anyhow::Result<Settings> {
        let branding_dir = std::path::Path::new(data_dir).join("branding");
        tokio::fs::create_dir_all(&branding_dir).await?;

        let mut logo_url: Option<String> = None;
        let mut hero_url: Option<String> = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();
            if name != "logo" && name != "hero" {
                continue;
            }

            let bytes = field.bytes().await?.to_vec();
            let format = image::guess_format(&bytes)
                .map_err(|_| anyhow::anyhow!("Le champ '{name}' n'est pas une image reconnue"))?;
            let extension = match format {
                image::ImageFormat::Jpeg => "jpg",
                image::ImageFormat::Png => "png",
                image::ImageFormat::WebP => "webp",
                _ => anyhow::bail!("Format d'image non supporté pour '{name}'"),
            };
            image::load_from_memory(&bytes)
                .map_err(|_| anyhow::anyhow!("Image illisible pour '{name}'"))?;

            let stored_name = format!("{name}-{}.{extension}", Uuid::new_v4());
            tokio::fs::write(branding_dir.join(&stored_name), &bytes).await?;

            let url = format!("/files/branding/{stored_name}");
            match name.as_str() {
                "logo" => logo_url = Some(url),
                _ => hero_url = Some(url),
            }
        }

        if logo_url.is_none() && hero_url.is_none() {
            anyhow::bail!("Aucun fichier reçu — champs attendus : 'logo', 'hero'");
        }

        let settings = sqlx::query_as::<_, Settings>(
            "UPDATE settings
             SET logo_url   = COALESCE($1, logo_url),
                 hero_url   = COALESCE($2, hero_url),
                 updated_at = NOW()
             WHERE id = 1
             RETURNING *",
        )
        .bind(logo_url)
        .bind(hero_url)
        .fetch_one(pool)
        .await?;
        Ok(settings)
    }
}
