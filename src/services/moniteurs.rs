use sqlx::PgPool;
use uuid::Uuid;

use crate::models::moniteur::{CreateMoniteurRequest, Moniteur, UpdateMoniteurRequest};

pub struct MoniteurService;

impl MoniteurService {
    pub async fn list(pool: &PgPool) -> anyhow::Result<Vec<Moniteur>> {
        let moniteurs = sqlx::query_as::<_, Moniteur>(
            "SELECT * FROM moniteurs WHERE is_active = TRUE ORDER BY nom, prenom",
        )
        .fetch_all(pool)
        .await?;
        Ok(moniteurs)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Moniteur>> {
        let moniteur = sqlx::query_as::<_, Moniteur>("SELECT * FROM moniteurs WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(moniteur)
    }

    pub async fn create(pool: &PgPool, req: &CreateMoniteurRequest) -> anyhow::Result<Moniteur> {
        let salle_nom = salle_nom_for(pool, req.salle_id).await?;

        let moniteur = sqlx::query_as::<_, Moniteur>(
            "INSERT INTO moniteurs
               (nom, prenom, sexe, telephone, email, fonction,
                salle_id, salle_nom, date_integration)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(&req.nom)
        .bind(&req.prenom)
        .bind(&req.sexe)
        .bind(&req.telephone)
        .bind(&req.email)
        .bind(req.fonction.as_deref().unwrap_or("moniteur"))
        .bind(req.salle_id)
        .bind(salle_nom)
        .bind(req.date_integration)
        .fetch_one(pool)
        .await?;
        Ok(moniteur)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateMoniteurRequest,
    ) -> anyhow::Result<Moniteur> {
        let salle_nom = salle_nom_for(pool, req.salle_id).await?;

        let moniteur = sqlx::query_as::<_, Moniteur>(
            "UPDATE moniteurs
             SET nom              = COALESCE($1, nom),
                 prenom           = COALESCE($2, prenom),
                 sexe             = COALESCE($3, sexe),
                 telephone        = COALESCE($4, telephone),
                 email            = COALESCE($5, email),
                 fonction         = COALESCE($6, fonction),
                 salle_id         = COALESCE($7, salle_id),
                 salle_nom        = COALESCE($8, salle_nom),
                 date_integration = COALESCE($9, date_integration),
                 is_active        = COALESCE($10, is_active)
             WHERE id = $11
             RETURNING *",
        )
        .bind(&req.nom)
        .bind(&req.prenom)
        .bind(&req.sexe)
        .bind(&req.telephone)
        .bind(&req.email)
        .bind(&req.fonction)
        .bind(req.salle_id)
        .bind(salle_nom)
        .bind(req.date_integration)
        .bind(req.is_active)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(moniteur)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("UPDATE moniteurs SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

async fn salle_nom_for(pool: &PgPool, salle_id: Option<Uuid>) -> anyhow::Result<Option<String>> {
    match salle_id {
        None => Ok(None),
        Some(id) => {
            let nom: Option<String> = sqlx::query_scalar("SELECT nom FROM salles WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
            if nom.is_none() {
                anyhow::bail!("Salle introuvable");
            }
            Ok(nom)
        }
    }
}
