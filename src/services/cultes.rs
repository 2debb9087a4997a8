use sqlx::PgPool;
use uuid::Uuid;

use crate::models::culte::{CreateCulteRequest, Culte, UpdateCulteRequest};

pub struct CulteService;

impl CulteService {
    pub async fn list(pool: &PgPool) -> anyhow::Result<Vec<Culte>> {
        let cultes = sqlx::query_as::<_, Culte>(
            "SELECT * FROM cultes ORDER BY date_culte DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(cultes)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Culte>> {
        let culte = sqlx::query_as::<_, Culte>("SELECT * FROM cultes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(culte)
    }

    pub async fn create(pool: &PgPool, req: &CreateCulteRequest) -> anyhow::Result<Culte> {
        let culte = sqlx::query_as::<_, Culte>(
            "INSERT INTO cultes
               (date_culte, theme, orateur, nb_enfants, nb_moniteurs,
                nb_visiteurs, offrande, observations)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(req.date_culte)
        .bind(&req.theme)
        .bind(&req.orateur)
        .bind(req.nb_enfants.unwrap_or(0))
        .bind(req.nb_moniteurs.unwrap_or(0))
        .bind(req.nb_visiteurs.unwrap_or(0))
        .bind(req.offrande.unwrap_or(0))
        .bind(&req.observations)
        .fetch_one(pool)
        .await?;
        Ok(culte)
    }

    pub async fn update(pool: &PgPool, id: Uuid, req: &UpdateCulteRequest) -> anyhow::Result<Culte> {
        let culte = sqlx::query_as::<_, Culte>(
            "UPDATE cultes
             SET date_culte   = COALESCE($1, date_culte),
                 theme        = COALESCE($2, theme),
                 orateur      = COALESCE($3, orateur),
                 nb_enfants   = COALESCE($4, nb_enfants),
                 nb_moniteurs = COALESCE($5, nb_moniteurs),
                 nb_visiteurs = COALESCE($6, nb_visiteurs),
                 offrande     = COALESCE($7, offrande),
                 observations = COALESCE($8, observations)
             WHERE id = $9
             RETURNING *",
        )
        .bind(req.date_culte)
        .bind(&req.theme)
        .bind(&req.orateur)
        .bind(req.nb_enfants)
        .bind(req.nb_moniteurs)
        .bind(req.nb_visiteurs)
        .bind(req.offrande)
        .bind(&req.observations)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(culte)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM cultes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
