use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, register_gauge_vec, Counter,
    CounterVec, Gauge, GaugeVec,
};
use sqlx::PgPool;
use tracing::{info, warn};

lazy_static! {
    // ── Compteurs d'événements ──────────────────────────────────────────────
    pub static ref LOGINS_COUNTER: CounterVec = register_counter_vec!(
        "api_logins_total",
        "Tentatives de login par statut",
        &["status"]
    ).unwrap();

    pub static ref PHOTO_UPLOADS_COUNTER: Counter = register_counter!(
        "api_photo_uploads_total",
        "Photos uploadées"
    ).unwrap();

    pub static ref RECLASSEMENTS_COUNTER: Counter = register_counter!(
        "api_reclassements_total",
        "Exécutions du reclassement par âge"
    ).unwrap();

    // ── Métriques métier ────────────────────────────────────────────────────
    pub static ref ENFANTS_GAUGE: GaugeVec = register_gauge_vec!(
        "ecodim_enfants_actifs_total",
        "Enfants actifs par salle",
        &["salle"]
    ).unwrap();

    pub static ref MONITEURS_GAUGE: Gauge = register_gauge!(
        "ecodim_moniteurs_actifs_total",
        "Moniteurs actifs"
    ).unwrap();

    pub static ref USERS_GAUGE: GaugeVec = register_gauge_vec!(
        "ecodim_users_total",
        "Utilisateurs actifs par rôle",
        &["role"]
    ).unwrap();

    pub static ref CAISSE_SOLDE_GAUGE: Gauge = register_gauge!(
        "ecodim_caisse_solde_fcfa",
        "Solde de caisse en FCFA"
    ).unwrap();
}

/// Spawn the background metrics collector (refreshes every 5 minutes).
pub fn start(pool: PgPool) {
    tokio::spawn(async move {
        if let Err(e) = collect(&pool).await {
            warn!("Metrics: initial collection failed: {}", e);
        }
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(300)).await;
            if let Err(e) = collect(&pool).await {
                warn!("Metrics: collection failed: {}", e);
            }
        }
    });
}

async fn collect(pool: &PgPool) -> anyhow::Result<()> {
    let enfants: Vec<(String, i64)> = sqlx::query_as(
        "SELECT COALESCE(salle_nom, 'non_affectes'), COUNT(*)::BIGINT
         FROM enfants WHERE is_active = TRUE
         GROUP BY salle_nom",
    )
    .fetch_all(pool)
    .await
    .unwrap_or_default();
    for (salle, count) in enfants {
        ENFANTS_GAUGE.with_label_values(&[&salle]).set(count as f64);
    }

    let moniteurs: i64 =
        sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM moniteurs WHERE is_active = TRUE")
            .fetch_one(pool)
            .await
            .unwrap_or(0);
    MONITEURS_GAUGE.set(moniteurs as f64);

    let users: Vec<(String, i64)> = sqlx::query_as(
        "SELECT role, COUNT(*)::BIGINT FROM users WHERE is_active = TRUE GROUP BY role",
    )
    .fetch_all(pool)
    .await
    .unwrap_or_default();
    for (role, count) in users {
        USERS_GAUGE.with_label_values(&[&role]).set(count as f64);
    }

    let recettes: i64 = sqlx::query_scalar(
        "SELECT (SELECT COALESCE(SUM(montant), 0)::BIGINT FROM paiements)
              + (SELECT COALESCE(SUM(montant), 0)::BIGINT FROM cotisations)
              + (SELECT COALESCE(SUM(offrande), 0)::BIGINT FROM cultes)",
    )
    .fetch_one(pool)
    .await
    .unwrap_or(0);
    let depenses: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(montant), 0)::BIGINT FROM depenses")
            .fetch_one(pool)
            .await
            .unwrap_or(0);
    CAISSE_SOLDE_GAUGE.set((recettes - depenses) as f64);

    info!("Metrics: collected");
    Ok(())
}
