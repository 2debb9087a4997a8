use sqlx::PgPool;
use uuid::Uuid;

use crate::models::depense::{CreateDepenseRequest, Depense, UpdateDepenseRequest};

pub struct DepenseService;

impl DepenseService {
    pub async fn list(pool: &PgPool) -> anyhow::Result<Vec<Depense>> {
        let depenses = sqlx::query_as::<_, Depense>(
            "SELECT * FROM depenses ORDER BY date_depense DESC, created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(depenses)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Depense>> {
        let depense = sqlx::query_as::<_, Depense>("SELECT * FROM depenses WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(depense)
    }

    pub async fn create(pool: &PgPool, req: &CreateDepenseRequest) -> anyhow::Result<Depense> {
        if req.montant <= 0 {
            anyhow::bail!("Le montant doit être strictement positif");
        }

        let depense = sqlx::query_as::<_, Depense>(
            "INSERT INTO depenses (libelle, montant, date_depense, categorie, beneficiaire)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(&req.libelle)
        .bind(req.montant)
        .bind(req.date_depense)
        .bind(req.categorie.as_deref().unwrap_or("fonctionnement"))
        .bind(&req.beneficiaire)
        .fetch_one(pool)
        .await?;
        Ok(depense)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateDepenseRequest,
    ) -> anyhow::Result<Depense> {
        if let Some(montant) = req.montant {
            if montant <= 0 {
                anyhow::bail!("Le montant doit être strictement positif");
            }
        }

        let depense = sqlx::query_as::<_, Depense>(
            "UPDATE depenses
             SET libelle      = COALESCE($1, libelle),
                 montant      = COALESCE($2, montant),
                 date_depense = COALESCE($3, date_depense),
                 categorie    = COALESCE($4, categorie),
                 beneficiaire = COALESCE($5, beneficiaire)
             WHERE id = $6
             RETURNING *",
        )
        .bind(&req.libelle)
        .bind(req.montant)
        .bind(req.date_depense)
        .bind(&req.categorie)
        .bind(&req.beneficiaire)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(depense)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM depenses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
