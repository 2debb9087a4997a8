use sqlx::PgPool;
use uuid::Uuid;

use crate::models::cotisation::{
    Cotisation, CotisationType, CreateCotisationRequest, CreateCotisationTypeRequest,
    UpdateCotisationRequest, UpdateCotisationTypeRequest,
};

/// Période au format "AAAA-MM" (mois entre 01 et 12).
pub fn periode_valide(periode: &str) -> bool {
    let mut parts = periode.splitn(2, '-');
    let annee = parts.next().unwrap_or("");
    let mois = parts.next().unwrap_or("");
    annee.len() == 4
        && annee.chars().all(|c| c.is_ascii_digit())
        && mois.len() == 2
        && mois.parse::<u32>().map(|m| (1..=12).contains(&m)).unwrap_or(false)
}

pub struct CotisationService;

impl CotisationService {
    // ── Types de cotisation ─────────────────────────────────────────────────

    pub async fn list_types(pool: &PgPool) -> anyhow::Result<Vec<CotisationType>> {
        let types = sqlx::query_as::<_, CotisationType>(
            "SELECT * FROM cotisation_types ORDER BY nom",
        )
        .fetch_all(pool)
        .await?;
        Ok(types)
    }

    pub async fn create_type(
        pool: &PgPool,
        req: &CreateCotisationTypeRequest,
    ) -> anyhow::Result<CotisationType> {
        let ct = sqlx::query_as::<_, CotisationType>(
            "INSERT INTO cotisation_types (nom, montant_standard, periodicite)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(&req.nom)
        .bind(req.montant_standard.unwrap_or(0))
        .bind(req.periodicite.as_deref().unwrap_or("mensuelle"))
        .fetch_one(pool)
        .await?;
        Ok(ct)
    }

    /// Renommer un type propage le nom vers `cotisations.type_nom`.
    pub async fn update_type(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateCotisationTypeRequest,
    ) -> anyhow::Result<CotisationType> {
        let mut tx = pool.begin().await?;

        let ct = sqlx::query_as::<_, CotisationType>(
            "UPDATE cotisation_types
             SET nom              = COALESCE($1, nom),
                 montant_standard = COALESCE($2, montant_standard),
                 periodicite      = COALESCE($3, periodicite)
             WHERE id = $4
             RETURNING *",
        )
        .bind(&req.nom)
        .bind(req.montant_standard)
        .bind(&req.periodicite)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if req.nom.is_some() {
            sqlx::query("UPDATE cotisations SET type_nom = $1 WHERE cotisation_type_id = $2")
                .bind(&ct.nom)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(ct)
    }

    pub async fn delete_type(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM cotisation_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    // ── Versements ──────────────────────────────────────────────────────────

    pub async fn list(pool: &PgPool, periode: Option<&str>) -> anyhow::Result<Vec<Cotisation>> {
        let cotisations = match periode {
            Some(p) => {
                sqlx::query_as::<_, Cotisation>(
                    "SELECT * FROM cotisations WHERE periode = $1
                     ORDER BY date_versement DESC",
                )
                .bind(p)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Cotisation>(
                    "SELECT * FROM cotisations ORDER BY date_versement DESC",
                )
                .fetch_all(pool)
                .await?
            }
        };
        Ok(cotisations)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Cotisation>> {
        let cotisation =
            sqlx::query_as::<_, Cotisation>("SELECT * FROM cotisations WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(cotisation)
    }

    pub async fn create(
        pool: &PgPool,
        req: &CreateCotisationRequest,
    ) -> anyhow::Result<Cotisation> {
        if req.montant <= 0 {
            anyhow::bail!("Le montant doit être strictement positif");
        }
        if !periode_valide(&req.periode) {
            anyhow::bail!("Période invalide — utilisez AAAA-MM (ex: 2026-03)");
        }

        let type_nom: String =
            sqlx::query_scalar("SELECT nom FROM cotisation_types WHERE id = $1")
                .bind(req.cotisation_type_id)
                .fetch_optional(pool)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Type de cotisation introuvable"))?;

        let moniteur_nom: String =
            sqlx::query_scalar("SELECT nom || ' ' || prenom FROM moniteurs WHERE id = $1")
                .bind(req.moniteur_id)
                .fetch_optional(pool)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Moniteur introuvable"))?;

        let cotisation = sqlx::query_as::<_, Cotisation>(
            "INSERT INTO cotisations
               (cotisation_type_id, type_nom, moniteur_id, moniteur_nom,
                montant, periode, date_versement)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(req.cotisation_type_id)
        .bind(type_nom)
        .bind(req.moniteur_id)
        .bind(moniteur_nom)
        .bind(req.montant)
        .bind(&req.periode)
        .bind(req.date_versement)
        .fetch_one(pool)
        .await?;
        Ok(cotisation)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateCotisationRequest,
    ) -> anyhow::Result<Cotisation> {
        if let Some(montant) = req.montant {
            if montant <= 0 {
                anyhow::bail!("Le montant doit être strictement positif");
            }
        }
        if let Some(periode) = req.periode.as_deref() {
            if !periode_valide(periode) {
                anyhow::bail!("Période invalide — utilisez AAAA-MM (ex: 2026-03)");
            }
        }

        let cotisation = sqlx::query_as::<_, Cotisation>(
            "UPDATE cotisations
             SET montant        = COALESCE($1, montant),
                 periode        = COALESCE($2, periode),
                 date_versement = COALESCE($3, date_versement)
             WHERE id = $4
             RETURNING *",
        )
        .bind(req.montant)
        .bind(&req.periode)
        .bind(req.date_versement)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(cotisation)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM cotisations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::periode_valide;

    #[test]
    fn formats_de_periode() {
        assert!(periode_valide("2026-03"));
        assert!(periode_valide("1999-12"));
        assert!(!periode_valide("2026-13"));
        assert!(!periode_valide("2026-00"));
        assert!(!periode_valide("2026-3"));
        assert!(!periode_valide("26-03"));
        assert!(!periode_valide("mars 2026"));
        assert!(!periode_valide(""));
    }
}
