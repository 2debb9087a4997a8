use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    models::{
        activite::{
            Activite, ActiviteParticipant, CreateActiviteRequest, UpdateActiviteRequest,
        },
        presence::ParticipantRef,
    },
    services::presences::resolve_participant_nom,
};

pub struct ActiviteService;

impl ActiviteService {
    pub async fn list(pool: &PgPool) -> anyhow::Result<Vec<Activite>> {
        let activites = sqlx::query_as::<_, Activite>(
            "SELECT * FROM activites ORDER BY date_debut DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(activites)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Activite>> {
        let activite = sqlx::query_as::<_, Activite>("SELECT * FROM activites WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(activite)
    }

    pub async fn create(pool: &PgPool, req: &CreateActiviteRequest) -> anyhow::Result<Activite> {
        let activite = sqlx::query_as::<_, Activite>(
            "INSERT INTO activites
               (titre, description, type_activite, date_debut, date_fin, lieu, salle_id, cout)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(&req.titre)
        .bind(&req.description)
        .bind(req.type_activite.as_deref().unwrap_or("sortie"))
        .bind(req.date_debut)
        .bind(req.date_fin)
        .bind(&req.lieu)
        .bind(req.salle_id)
        .bind(req.cout.unwrap_or(0))
        .fetch_one(pool)
        .await?;
        Ok(activite)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateActiviteRequest,
    ) -> anyhow::Result<Activite> {
        let activite = sqlx::query_as::<_, Activite>(
            "UPDATE activites
             SET titre         = COALESCE($1, titre),
                 description   = COALESCE($2, description),
                 type_activite = COALESCE($3, type_activite),
                 date_debut    = COALESCE($4, date_debut),
                 date_fin      = COALESCE($5, date_fin),
                 lieu          = COALESCE($6, lieu),
                 salle_id      = COALESCE($7, salle_id),
                 cout          = COALESCE($8, cout),
                 statut        = COALESCE($9, statut)
             WHERE id = $10
             RETURNING *",
        )
        .bind(&req.titre)
        .bind(&req.description)
        .bind(&req.type_activite)
        .bind(req.date_debut)
        .bind(req.date_fin)
        .bind(&req.lieu)
        .bind(req.salle_id)
        .bind(req.cout)
        .bind(&req.statut)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(activite)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM activites WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    // ── Participants (référence polymorphe moniteur/enfant) ─────────────────

    pub async fn list_participants(
        pool: &PgPool,
        activite_id: Uuid,
    ) -> anyhow::Result<Vec<ActiviteParticipant>> {
        let participants = sqlx::query_as::<_, ActiviteParticipant>(
            "SELECT * FROM activite_participants WHERE activite_id = $1
             ORDER BY personne_type, personne_nom",
        )
        .bind(activite_id)
        .fetch_all(pool)
        .await?;
        Ok(participants)
    }

    pub async fn add_participant(
        pool: &PgPool,
        activite_id: Uuid,
        participant: &ParticipantRef,
    ) -> anyhow::Result<ActiviteParticipant> {
        let personne_nom = resolve_participant_nom(pool, participant).await?;

        let row = sqlx::query_as::<_, ActiviteParticipant>(
            "INSERT INTO activite_participants
               (activite_id, personne_type, personne_id, personne_nom)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (activite_id, personne_type, personne_id)
             DO UPDATE SET personne_nom = EXCLUDED.personne_nom
             RETURNING *",
        )
        .bind(activite_id)
        .bind(participant.kind())
        .bind(participant.id())
        .bind(personne_nom)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn remove_participant(
        pool: &PgPool,
        activite_id: Uuid,
        participant: &ParticipantRef,
    ) -> anyhow::Result<()> {
        sqlx::query(
            "DELETE FROM activite_participants
             WHERE activite_id = $1 AND personne_type = $2 AND personne_id = $3",
        )
        .bind(activite_id)
        .bind(participant.kind())
        .bind(participant.id())
        .execute(pool)
        .await?;
        Ok(())
    }
}
