use sqlx::PgPool;
use uuid::Uuid;

use crate::models::salle::{CreateSalleRequest, Salle, SalleEffectif, UpdateSalleRequest};

pub struct SalleService;

impl SalleService {
    pub async fn list(pool: &PgPool) -> anyhow::Result<Vec<Salle>> {
        let salles = sqlx::query_as::<_, Salle>("SELECT * FROM salles ORDER BY nom")
            .fetch_all(pool)
            .await?;
        Ok(salles)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Salle>> {
        let salle = sqlx::query_as::<_, Salle>("SELECT * FROM salles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(salle)
    }

    pub async fn create(pool: &PgPool, req: &CreateSalleRequest) -> anyhow::Result<Salle> {
        let salle = sqlx::query_as::<_, Salle>(
            "INSERT INTO salles (nom, capacite, responsable_id, adjoint_id)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&req.nom)
        .bind(req.capacite)
        .bind(req.responsable_id)
        .bind(req.adjoint_id)
        .fetch_one(pool)
        .await?;
        Ok(salle)
    }

    /// Un renommage propage le nouveau nom vers toutes les copies
    /// dénormalisées (`enfants.salle_nom`, `moniteurs.salle_nom`) dans la
    /// même transaction — il n'y a pas de trigger côté base.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateSalleRequest,
    ) -> anyhow::Result<Salle> {
        let mut tx = pool.begin().await?;

        let salle = sqlx::query_as::<_, Salle>(
            "UPDATE salles
             SET nom            = COALESCE($1, nom),
                 capacite       = COALESCE($2, capacite),
                 responsable_id = COALESCE($3, responsable_id),
                 adjoint_id     = COALESCE($4, adjoint_id)
             WHERE id = $5
             RETURNING *",
        )
        .bind(&req.nom)
        .bind(req.capacite)
        .bind(req.responsable_id)
        .bind(req.adjoint_id)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if req.nom.is_some() {
            sqlx::query("UPDATE enfants SET salle_nom = $1 WHERE salle_id = $2")
                .bind(&salle.nom)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            sqlx::query("UPDATE moniteurs SET salle_nom = $1 WHERE salle_id = $2")
                .bind(&salle.nom)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(salle)
    }

    /// La suppression détache enfants et moniteurs (FK ON DELETE SET NULL) ;
    /// on efface aussi leurs copies de nom pour ne pas laisser un libellé
    /// orphelin.
    pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE enfants SET salle_nom = NULL WHERE salle_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE moniteurs SET salle_nom = NULL WHERE salle_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM salles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn effectifs(pool: &PgPool) -> anyhow::Result<Vec<SalleEffectif>> {
        let effectifs = sqlx::query_as::<_, SalleEffectif>(
            "SELECT s.id, s.nom, s.capacite,
                    (SELECT COUNT(*) FROM enfants e
                      WHERE e.salle_id = s.id AND e.is_active = TRUE) AS nb_enfants,
                    (SELECT COUNT(*) FROM moniteurs m
                      WHERE m.salle_id = s.id AND m.is_active = TRUE) AS nb_moniteurs
             FROM salles s
             ORDER BY s.nom",
        )
        .fetch_all(pool)
        .await?;
        Ok(effectifs)
    }
}
