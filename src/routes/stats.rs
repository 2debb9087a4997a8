use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    middleware::auth::require_permission,
    models::auth::AuthenticatedUser,
    services::stats::StatsService,
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

macro_rules! stats_handler {
    ($name:ident, $permission:literal, $service_fn:ident) => {
        pub async fn $name(
            State(state): State<AppState>,
            user: AuthenticatedUser,
        ) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
            require_permission(&user, $permission)?;
            StatsService::$service_fn(&state.db).await.map(Json).map_err(erreur)
        }
    };
}

stats_handler!(enfants_statistics, "stats.view", enfants);
stats_handler!(moniteurs_statistics, "stats.view", moniteurs);
stats_handler!(activites_statistics, "stats.view", activites);
stats_handler!(presences_statistics, "stats.view", presences);
stats_handler!(paiements_statistics, "stats.view", paiements);
stats_handler!(depenses_statistics, "stats.view", depenses);
stats_handler!(cotisations_statistics, "stats.view", cotisations);
stats_handler!(cultes_statistics, "stats.view", cultes);
stats_handler!(caisse_statistics, "caisse.view", caisse);
stats_handler!(dashboard_statistics, "dashboard.view", dashboard);
