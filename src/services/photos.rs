use axum::extract::Multipart;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::photo::{Photo, UpdatePhotoRequest};
use crate::services::metrics::PHOTO_UPLOADS_COUNTER;

pub struct PhotoService;

impl PhotoService {
    pub async fn list(pool: &PgPool, activite_id: Option<Uuid>) -> anyhow::Result<Vec<Photo>> {
        let photos = match activite_id {
            Some(aid) => {
                sqlx::query_as::<_, Photo>(
                    "SELECT * FROM photos WHERE activite_id = $1 ORDER BY created_at DESC",
                )
                .bind(aid)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Photo>("SELECT * FROM photos ORDER BY created_at DESC")
                    .fetch_all(pool)
                    .await?
            }
        };
        Ok(photos)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Photo>> {
        let photo = sqlx::query_as::<_, Photo>("SELECT * FROM photos WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(photo)
    }

    /// Upload multipart : champ fichier `photo` + champs texte optionnels
    /// `titre` et `activite_id`. Le contenu doit être une image décodable.
    pub async fn upload(
        pool: &PgPool,
        uploaded_by: Uuid,
        data_dir: &str,
        mut multipart: Multipart,
    ) -> anyhow::Result<Photo> {
        let mut titre: Option<String> = None;
        let mut activite_id: Option<Uuid> = None;
        let mut fichier: Option<(String, Vec<u8>)> = None;

        while let Some(field) = multipart.next_field().await? {
            match field.name().unwrap_or("") {
                "titre" => titre = Some(field.text().await?),
                "activite_id" => activite_id = Some(field.text().await?.parse()?),
                "photo" => {
                    if let Some(ct) = field.content_type() {
                        let declared: mime::Mime =
                            ct.parse().unwrap_or(mime::APPLICATION_OCTET_STREAM);
                        if declared.type_() != mime::IMAGE {
                            anyhow::bail!("Le champ 'photo' doit être une image");
                        }
                    }
                    let filename = field.file_name().unwrap_or("photo.jpg").to_string();
                    let bytes = field.bytes().await?.to_vec();
                    fichier = Some((filename, bytes));
                }
                _ => {}
            }
        }

        let (filename, bytes) =
            fichier.ok_or_else(|| anyhow::anyhow!("Champ 'photo' manquant"))?;

        let format = image::guess_format(&bytes)
            .map_err(|_| anyhow::anyhow!("Le fichier n'est pas une image reconnue"))?;
        let extension = match format {
            image::ImageFormat::Jpeg => "jpg",
            image::ImageFormat::Png => "png",
            image::ImageFormat::WebP => "webp",
            _ => anyhow::bail!("Format d'image non supporté : {filename}"),
        };
        // Décodage complet : rejette les fichiers tronqués ou maquillés.
        image::load_from_memory(&bytes)
            .map_err(|_| anyhow::anyhow!("Image illisible : {filename}"))?;

        let photo_dir = std::path::Path::new(data_dir).join("photos");
        tokio::fs::create_dir_all(&photo_dir).await?;

        let stored_name = format!("{}.{extension}", Uuid::new_v4());
        tokio::fs::write(photo_dir.join(&stored_name), &bytes).await?;

        let photo = sqlx::query_as::<_, Photo>(
            "INSERT INTO photos (titre, fichier_url, activite_id, uploaded_by)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&titre)
        .bind(format!("/files/photos/{stored_name}"))
        .bind(activite_id)
        .bind(uploaded_by)
        .fetch_one(pool)
        .await?;

        PHOTO_UPLOADS_COUNTER.inc();
        Ok(photo)
    }

    pub async fn update(pool: &PgPool, id: Uuid, req: &UpdatePhotoRequest) -> anyhow::Result<Photo> {
        let photo = sqlx::query_as::<_, Photo>(
            "UPDATE photos
             SET titre       = COALESCE($1, titre),
                 activite_id = COALESCE($2, activite_id)
             WHERE id = $3
             RETURNING *",
        )
        .bind(&req.titre)
        .bind(req.activite_id)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(photo)
    }

    /// Supprime la ligne et le fichier ; un fichier déjà absent n'est pas
    /// une erreur.
    pub async fn delete(pool: &PgPool, data_dir: &str, id: Uuid) -> anyhow::Result<()> {
        let fichier_url: Option<String> =
            sqlx::query_scalar("SELECT fichier_url FROM photos WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;

        sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if let Some(url) = fichier_url {
            if let Some(relative) = url.strip_prefix("/files/") {
                let path = std::path::Path::new(data_dir).join(relative);
                let _ = tokio::fs::remove_file(path).await;
            }
        }
        Ok(())
    }
}
