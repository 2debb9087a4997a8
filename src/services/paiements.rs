use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    models::paiement::{CreatePaiementRequest, Paiement, UpdatePaiementRequest},
    services::presences::resolve_participant_nom,
};

pub const MODES_VALIDES: [&str; 4] = ["especes", "mobile_money", "virement", "cheque"];

pub struct PaiementService;

impl PaiementService {
    pub async fn list(pool: &PgPool) -> anyhow::Result<Vec<Paiement>> {
        let paiements = sqlx::query_as::<_, Paiement>(
            "SELECT * FROM paiements ORDER BY date_paiement DESC, created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(paiements)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Paiement>> {
        let paiement = sqlx::query_as::<_, Paiement>("SELECT * FROM paiements WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(paiement)
    }

    pub async fn create(pool: &PgPool, req: &CreatePaiementRequest) -> anyhow::Result<Paiement> {
        if req.montant <= 0 {
            anyhow::bail!("Le montant doit être strictement positif");
        }
        let mode = req.mode.as_deref().unwrap_or("especes");
        if !MODES_VALIDES.contains(&mode) {
            anyhow::bail!("Mode de paiement invalide : {mode}");
        }

        let (personne_type, personne_id, personne_nom) = match &req.payeur {
            Some(p) => {
                let nom = resolve_participant_nom(pool, p).await?;
                (Some(p.kind().to_string()), Some(p.id()), Some(nom))
            }
            None => (None, None, None),
        };

        let paiement = sqlx::query_as::<_, Paiement>(
            "INSERT INTO paiements
               (libelle, montant, date_paiement, mode, activite_id,
                personne_type, personne_id, personne_nom)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(&req.libelle)
        .bind(req.montant)
        .bind(req.date_paiement)
        .bind(mode)
        .bind(req.activite_id)
        .bind(personne_type)
        .bind(personne_id)
        .bind(personne_nom)
        .fetch_one(pool)
        .await?;
        Ok(paiement)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdatePaiementRequest,
    ) -> anyhow::Result<Paiement> {
        if let Some(montant) = req.montant {
            if montant <= 0 {
                anyhow::bail!("Le montant doit être strictement positif");
            }
        }
        if let Some(mode) = req.mode.as_deref() {
            if !MODES_VALIDES.contains(&mode) {
                anyhow::bail!("Mode de paiement invalide : {mode}");
            }
        }

        let paiement = sqlx::query_as::<_, Paiement>(
            "UPDATE paiements
             SET libelle       = COALESCE($1, libelle),
                 montant       = COALESCE($2, montant),
                 date_paiement = COALESCE($3, date_paiement),
                 mode          = COALESCE($4, mode),
                 activite_id   = COALESCE($5, activite_id)
             WHERE id = $6
             RETURNING *",
        )
        .bind(&req.libelle)
        .bind(req.montant)
        .bind(req.date_paiement)
        .bind(&req.mode)
        .bind(req.activite_id)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(paiement)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM paiements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
