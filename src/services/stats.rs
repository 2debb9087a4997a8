//! Agrégats servis par les endpoints `/{ressource}-statistics`.
//!
//! Chaque fonction renvoie un `serde_json::Value` prêt à être servi : les
//! écrans de statistiques du dashboard consomment ces formes telles quelles.

use serde_json::{json, Value};
use sqlx::PgPool;

use crate::services::classification::ADO_PARTI;

pub struct StatsService;

impl StatsService {
    pub async fn enfants(pool: &PgPool) -> anyhow::Result<Value> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM enfants WHERE is_active = TRUE")
                .fetch_one(pool)
                .await?;

        let par_salle: Vec<(String, i64)> = sqlx::query_as(
            "SELECT COALESCE(salle_nom, 'Non affectés'), COUNT(*)
             FROM enfants WHERE is_active = TRUE
             GROUP BY salle_nom ORDER BY 1",
        )
        .fetch_all(pool)
        .await?;

        let par_sexe: Vec<(String, i64)> = sqlx::query_as(
            "SELECT COALESCE(sexe, '?'), COUNT(*)
             FROM enfants WHERE is_active = TRUE
             GROUP BY sexe",
        )
        .fetch_all(pool)
        .await?;

        let baptises: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM enfants WHERE is_active = TRUE AND baptise = TRUE",
        )
        .fetch_one(pool)
        .await?;

        let ados_partis: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM enfants WHERE is_active = TRUE AND salle_nom = $1",
        )
        .bind(ADO_PARTI)
        .fetch_one(pool)
        .await?;

        Ok(json!({
            "total": total,
            "par_salle": par_salle.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
            "par_sexe": par_sexe.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
            "baptises": baptises,
            "ados_partis": ados_partis,
        }))
    }

    pub async fn moniteurs(pool: &PgPool) -> anyhow::Result<Value> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM moniteurs WHERE is_active = TRUE")
                .fetch_one(pool)
                .await?;

        let par_fonction: Vec<(String, i64)> = sqlx::query_as(
            "SELECT fonction, COUNT(*) FROM moniteurs WHERE is_active = TRUE
             GROUP BY fonction ORDER BY 1",
        )
        .fetch_all(pool)
        .await?;

        let par_salle: Vec<(String, i64)> = sqlx::query_as(
            "SELECT COALESCE(salle_nom, 'Sans salle'), COUNT(*)
             FROM moniteurs WHERE is_active = TRUE
             GROUP BY salle_nom ORDER BY 1",
        )
        .fetch_all(pool)
        .await?;

        Ok(json!({
            "total": total,
            "par_fonction": par_fonction.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
            "par_salle": par_salle.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
        }))
    }

    pub async fn activites(pool: &PgPool) -> anyhow::Result<Value> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activites")
            .fetch_one(pool)
            .await?;

        let par_statut: Vec<(String, i64)> = sqlx::query_as(
            "SELECT statut, COUNT(*) FROM activites GROUP BY statut ORDER BY 1",
        )
        .fetch_all(pool)
        .await?;

        let cout_total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(cout), 0)::BIGINT FROM activites")
                .fetch_one(pool)
                .await?;

        Ok(json!({
            "total": total,
            "par_statut": par_statut.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
            "cout_total": cout_total,
        }))
    }

    pub async fn presences(pool: &PgPool) -> anyhow::Result<Value> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM presences")
            .fetch_one(pool)
            .await?;

        let par_statut: Vec<(String, i64)> = sqlx::query_as(
            "SELECT statut, COUNT(*) FROM presences GROUP BY statut ORDER BY 1",
        )
        .fetch_all(pool)
        .await?;

        let par_type: Vec<(String, i64)> = sqlx::query_as(
            "SELECT personne_type, COUNT(*) FROM presences GROUP BY personne_type",
        )
        .fetch_all(pool)
        .await?;

        Ok(json!({
            "total": total,
            "par_statut": par_statut.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
            "par_type": par_type.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
        }))
    }

    pub async fn paiements(pool: &PgPool) -> anyhow::Result<Value> {
        let (nombre, montant_total): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(montant), 0)::BIGINT FROM paiements",
        )
        .fetch_one(pool)
        .await?;

        let par_mode: Vec<(String, i64)> = sqlx::query_as(
            "SELECT mode, COALESCE(SUM(montant), 0)::BIGINT FROM paiements GROUP BY mode ORDER BY 1",
        )
        .fetch_all(pool)
        .await?;

        let par_mois: Vec<(String, i64)> = sqlx::query_as(
            "SELECT TO_CHAR(date_paiement, 'YYYY-MM') AS mois, COALESCE(SUM(montant), 0)::BIGINT
             FROM paiements GROUP BY mois ORDER BY mois DESC LIMIT 12",
        )
        .fetch_all(pool)
        .await?;

        Ok(json!({
            "nombre": nombre,
            "montant_total": montant_total,
            "par_mode": par_mode.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
            "par_mois": par_mois.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
        }))
    }

    pub async fn depenses(pool: &PgPool) -> anyhow::Result<Value> {
        let (nombre, montant_total): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(montant), 0)::BIGINT FROM depenses",
        )
        .fetch_one(pool)
        .await?;

        let par_categorie: Vec<(String, i64)> = sqlx::query_as(
            "SELECT categorie, COALESCE(SUM(montant), 0)::BIGINT FROM depenses
             GROUP BY categorie ORDER BY 1",
        )
        .fetch_all(pool)
        .await?;

        Ok(json!({
            "nombre": nombre,
            "montant_total": montant_total,
            "par_categorie": par_categorie.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
        }))
    }

    pub async fn cotisations(pool: &PgPool) -> anyhow::Result<Value> {
        let (nombre, montant_total): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(montant), 0)::BIGINT FROM cotisations",
        )
        .fetch_one(pool)
        .await?;

        let par_periode: Vec<(String, i64)> = sqlx::query_as(
            "SELECT periode, COALESCE(SUM(montant), 0)::BIGINT FROM cotisations
             GROUP BY periode ORDER BY periode DESC LIMIT 12",
        )
        .fetch_all(pool)
        .await?;

        let par_type: Vec<(String, i64)> = sqlx::query_as(
            "SELECT type_nom, COALESCE(SUM(montant), 0)::BIGINT FROM cotisations
             GROUP BY type_nom ORDER BY 1",
        )
        .fetch_all(pool)
        .await?;

        Ok(json!({
            "nombre": nombre,
            "montant_total": montant_total,
            "par_periode": par_periode.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
            "par_type": par_type.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
        }))
    }

    pub async fn cultes(pool: &PgPool) -> anyhow::Result<Value> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cultes")
            .fetch_one(pool)
            .await?;

        let (enfants_moyen, moniteurs_moyen, visiteurs_moyen): (f64, f64, f64) = sqlx::query_as(
            "SELECT COALESCE(AVG(nb_enfants), 0)::FLOAT8,
                    COALESCE(AVG(nb_moniteurs), 0)::FLOAT8,
                    COALESCE(AVG(nb_visiteurs), 0)::FLOAT8
             FROM cultes",
        )
        .fetch_one(pool)
        .await?;

        let offrandes_total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(offrande), 0)::BIGINT FROM cultes")
                .fetch_one(pool)
                .await?;

        Ok(json!({
            "total": total,
            "enfants_moyen": enfants_moyen,
            "moniteurs_moyen": moniteurs_moyen,
            "visiteurs_moyen": visiteurs_moyen,
            "offrandes_total": offrandes_total,
        }))
    }

    /// Solde de caisse : paiements + cotisations + offrandes − dépenses.
    pub async fn caisse(pool: &PgPool) -> anyhow::Result<Value> {
        let paiements: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(montant), 0)::BIGINT FROM paiements")
                .fetch_one(pool)
                .await?;
        let cotisations: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(montant), 0)::BIGINT FROM cotisations")
                .fetch_one(pool)
                .await?;
        let offrandes: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(offrande), 0)::BIGINT FROM cultes")
                .fetch_one(pool)
                .await?;
        let depenses: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(montant), 0)::BIGINT FROM depenses")
                .fetch_one(pool)
                .await?;

        Ok(json!({
            "recettes": {
                "paiements": paiements,
                "cotisations": cotisations,
                "offrandes": offrandes,
            },
            "depenses": depenses,
            "solde": paiements + cotisations + offrandes - depenses,
        }))
    }

    pub async fn dashboard(pool: &PgPool) -> anyhow::Result<Value> {
        let enfants: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM enfants WHERE is_active = TRUE")
                .fetch_one(pool)
                .await?;
        let moniteurs: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM moniteurs WHERE is_active = TRUE")
                .fetch_one(pool)
                .await?;
        let salles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM salles")
            .fetch_one(pool)
            .await?;
        let activites_prevues: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM activites WHERE statut IN ('prevue', 'en_cours')",
        )
        .fetch_one(pool)
        .await?;
        let caisse = Self::caisse(pool).await?;

        Ok(json!({
            "enfants": enfants,
            "moniteurs": moniteurs,
            "salles": salles,
            "activites_en_cours": activites_prevues,
            "caisse": caisse,
        }))
    }
}
