use sqlx::PgPool;
use uuid::Uuid;

use crate::models::presence::{
    CreatePresenceRequest, ParticipantRef, Presence, UpdatePresenceRequest,
};

pub const STATUTS_VALIDES: [&str; 3] = ["present", "absent", "excuse"];

/// Résout le nom d'affichage d'une référence polymorphe. Échoue si la
/// personne n'existe pas : on ne crée jamais de ligne pointant dans le vide.
pub async fn resolve_participant_nom(
    pool: &PgPool,
    participant: &ParticipantRef,
) -> anyhow::Result<String> {
    let nom: Option<String> = match participant {
        ParticipantRef::Moniteur(id) => {
            sqlx::query_scalar("SELECT nom || ' ' || prenom FROM moniteurs WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?
        }
        ParticipantRef::Enfant(id) => {
            sqlx::query_scalar("SELECT nom || ' ' || prenom FROM enfants WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?
        }
    };
    nom.ok_or_else(|| anyhow::anyhow!("Personne introuvable ({})", participant.kind()))
}

pub struct PresenceService;

impl PresenceService {
    /// Liste filtrable par date (celle du culte ou de l'activité du jour).
    pub async fn list(
        pool: &PgPool,
        date: Option<chrono::NaiveDate>,
    ) -> anyhow::Result<Vec<Presence>> {
        let presences = match date {
            Some(d) => {
                sqlx::query_as::<_, Presence>(
                    "SELECT * FROM presences WHERE date_presence = $1
                     ORDER BY personne_type, personne_nom",
                )
                .bind(d)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Presence>(
                    "SELECT * FROM presences ORDER BY date_presence DESC, personne_nom",
                )
                .fetch_all(pool)
                .await?
            }
        };
        Ok(presences)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Presence>> {
        let presence = sqlx::query_as::<_, Presence>("SELECT * FROM presences WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(presence)
    }

    pub async fn create(pool: &PgPool, req: &CreatePresenceRequest) -> anyhow::Result<Presence> {
        let statut = req.statut.as_deref().unwrap_or("present");
        if !STATUTS_VALIDES.contains(&statut) {
            anyhow::bail!("Statut invalide : {statut}");
        }

        let personne_nom = resolve_participant_nom(pool, &req.participant).await?;

        // Une présence par personne et par date : re-pointer écrase le statut.
        let presence = sqlx::query_as::<_, Presence>(
            "INSERT INTO presences
               (date_presence, personne_type, personne_id, personne_nom, salle_id, statut)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (date_presence, personne_type, personne_id)
             DO UPDATE SET statut = EXCLUDED.statut, salle_id = EXCLUDED.salle_id
             RETURNING *",
        )
        .bind(req.date_presence)
        .bind(req.participant.kind())
        .bind(req.participant.id())
        .bind(personne_nom)
        .bind(req.salle_id)
        .bind(statut)
        .fetch_one(pool)
        .await?;
        Ok(presence)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdatePresenceRequest,
    ) -> anyhow::Result<Presence> {
        if let Some(statut) = req.statut.as_deref() {
            if !STATUTS_VALIDES.contains(&statut) {
                anyhow::bail!("Statut invalide : {statut}");
            }
        }

        let presence = sqlx::query_as::<_, Presence>(
            "UPDATE presences
             SET statut   = COALESCE($1, statut),
                 salle_id = COALESCE($2, salle_id)
             WHERE id = $3
             RETURNING *",
        )
        .bind(&req.statut)
        .bind(req.salle_id)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(presence)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM presences WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
