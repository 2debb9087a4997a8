use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    models::enfant::{CreateEnfantRequest, Enfant, ReclassementResume, UpdateEnfantRequest},
    services::classification::{salle_pour_naissance, SalleCible},
};

pub struct EnfantService;

impl EnfantService {
    pub async fn list(pool: &PgPool) -> anyhow::Result<Vec<Enfant>> {
        let enfants = sqlx::query_as::<_, Enfant>(
            "SELECT * FROM enfants WHERE is_active = TRUE ORDER BY nom, prenom",
        )
        .fetch_all(pool)
        .await?;
        Ok(enfants)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Enfant>> {
        let enfant = sqlx::query_as::<_, Enfant>("SELECT * FROM enfants WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(enfant)
    }

    /// À la création, la salle explicite prime ; sinon elle est déduite de la
    /// date de naissance par le classificateur.
    pub async fn create(
        pool: &PgPool,
        req: &CreateEnfantRequest,
        today: NaiveDate,
    ) -> anyhow::Result<Enfant> {
        let (salle_id, salle_nom) = match req.salle_id {
            Some(id) => {
                let nom: Option<String> =
                    sqlx::query_scalar("SELECT nom FROM salles WHERE id = $1")
                        .bind(id)
                        .fetch_optional(pool)
                        .await?;
                match nom {
                    Some(nom) => (Some(id), Some(nom)),
                    None => anyhow::bail!("Salle introuvable"),
                }
            }
            None => match salle_pour_naissance(req.date_naissance, today) {
                SalleCible::Salle(nom) => {
                    let id: Option<Uuid> =
                        sqlx::query_scalar("SELECT id FROM salles WHERE nom = $1")
                            .bind(nom)
                            .fetch_optional(pool)
                            .await?;
                    (id, Some(nom.to_string()))
                }
                SalleCible::AdoParti => {
                    (None, Some(crate::services::classification::ADO_PARTI.to_string()))
                }
                SalleCible::Inchangee | SalleCible::NonAffectee => (None, None),
            },
        };

        let enfant = sqlx::query_as::<_, Enfant>(
            "INSERT INTO enfants
               (nom, prenom, sexe, date_naissance, salle_id, salle_nom,
                nom_pere, nom_mere, telephone_parent, quartier,
                baptise, date_bapteme, allergies)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING *",
        )
        .bind(&req.nom)
        .bind(&req.prenom)
        .bind(&req.sexe)
        .bind(req.date_naissance)
        .bind(salle_id)
        .bind(salle_nom)
        .bind(&req.nom_pere)
        .bind(&req.nom_mere)
        .bind(&req.telephone_parent)
        .bind(&req.quartier)
        .bind(req.baptise.unwrap_or(false))
        .bind(req.date_bapteme)
        .bind(&req.allergies)
        .fetch_one(pool)
        .await?;
        Ok(enfant)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateEnfantRequest,
    ) -> anyhow::Result<Enfant> {
        // Changement manuel de salle : la copie dénormalisée suit.
        let salle_nom: Option<String> = match req.salle_id {
            Some(salle_id) => {
                let nom: Option<String> =
                    sqlx::query_scalar("SELECT nom FROM salles WHERE id = $1")
                        .bind(salle_id)
                        .fetch_optional(pool)
                        .await?;
                if nom.is_none() {
                    anyhow::bail!("Salle introuvable");
                }
                nom
            }
            None => None,
        };

        let enfant = sqlx::query_as::<_, Enfant>(
            "UPDATE enfants
             SET nom              = COALESCE($1, nom),
                 prenom           = COALESCE($2, prenom),
                 sexe             = COALESCE($3, sexe),
                 date_naissance   = COALESCE($4, date_naissance),
                 salle_id         = COALESCE($5, salle_id),
                 salle_nom        = COALESCE($6, salle_nom),
                 nom_pere         = COALESCE($7, nom_pere),
                 nom_mere         = COALESCE($8, nom_mere),
                 telephone_parent = COALESCE($9, telephone_parent),
                 quartier         = COALESCE($10, quartier),
                 baptise          = COALESCE($11, baptise),
                 date_bapteme     = COALESCE($12, date_bapteme),
                 allergies        = COALESCE($13, allergies),
                 is_active        = COALESCE($14, is_active)
             WHERE id = $15
             RETURNING *",
        )
        .bind(&req.nom)
        .bind(&req.prenom)
        .bind(&req.sexe)
        .bind(req.date_naissance)
        .bind(req.salle_id)
        .bind(salle_nom)
        .bind(&req.nom_pere)
        .bind(&req.nom_mere)
        .bind(&req.telephone_parent)
        .bind(&req.quartier)
        .bind(req.baptise)
        .bind(req.date_bapteme)
        .bind(&req.allergies)
        .bind(req.is_active)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(enfant)
    }

    /// Désactivation (soft delete) — l'historique des présences et paiements
    /// reste attaché à la ligne.
    pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("UPDATE enfants SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Reclassement par âge de tous les enfants actifs.
    ///
    /// Une salle visée sans ligne correspondante n'est pas une erreur : le
    /// nom est écrit, l'id reste NULL et le nom est remonté dans le bilan.
    pub async fn reclasser_tous(
        pool: &PgPool,
        today: NaiveDate,
    ) -> anyhow::Result<ReclassementResume> {
        let salles: HashMap<String, Uuid> = sqlx::query_as::<_, (String, Uuid)>(
            "SELECT nom, id FROM salles",
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .collect();

        let enfants = Self::list(pool).await?;
        let mut resume = ReclassementResume::default();

        for enfant in enfants {
            resume.examines += 1;

            let (cible_id, cible_nom) = match salle_pour_naissance(enfant.date_naissance, today) {
                SalleCible::Inchangee => {
                    resume.inchanges += 1;
                    continue;
                }
                SalleCible::NonAffectee => {
                    resume.non_affectes += 1;
                    (None, None)
                }
                SalleCible::AdoParti => {
                    resume.ados_partis += 1;
                    (None, Some(crate::services::classification::ADO_PARTI.to_string()))
                }
                SalleCible::Salle(nom) => {
                    let id = salles.get(nom).copied();
                    if id.is_none() && !resume.salles_manquantes.iter().any(|s| s == nom) {
                        resume.salles_manquantes.push(nom.to_string());
                    }
                    (id, Some(nom.to_string()))
                }
            };

            if enfant.salle_id == cible_id && enfant.salle_nom == cible_nom {
                resume.inchanges += 1;
                continue;
            }

            sqlx::query("UPDATE enfants SET salle_id = $1, salle_nom = $2 WHERE id = $3")
                .bind(cible_id)
                .bind(&cible_nom)
                .bind(enfant.id)
                .execute(pool)
                .await?;
            resume.reaffectes += 1;
        }

        tracing::info!(
            "Reclassement : {} examinés, {} réaffectés, {} ados partis, {} non affectés",
            resume.examines,
            resume.reaffectes,
            resume.ados_partis,
            resume.non_affectes
        );
        Ok(resume)
    }
}
