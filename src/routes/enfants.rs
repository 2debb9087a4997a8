use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    middleware::auth::require_permission,
    models::{
        auth::AuthenticatedUser,
        enfant::{CreateEnfantRequest, UpdateEnfantRequest},
    },
    services::{enfants::EnfantService, metrics::RECLASSEMENTS_COUNTER},
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

pub async fn list_enfants(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "enfants.view")?;
    EnfantService::list(&state.db)
        .await
        .map(|enfants| Json(serde_json::to_value(enfants).unwrap()))
        .map_err(erreur)
}

pub async fn get_enfant(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "enfants.view")?;
    match EnfantService::get(&state.db, id).await {
        Ok(Some(enfant)) => Ok(Json(serde_json::to_value(enfant).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Enfant introuvable" })),
        )),
        Err(e) => Err(erreur(e)),
    }
}

pub async fn create_enfant(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateEnfantRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "enfants.create")?;
    EnfantService::create(&state.db, &body, Utc::now().date_naive())
        .await
        .map(|enfant| (StatusCode::CREATED, Json(serde_json::to_value(enfant).unwrap())))
        .map_err(erreur)
}

pub async fn update_enfant(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEnfantRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "enfants.update")?;
    EnfantService::update(&state.db, id, &body)
        .await
        .map(|enfant| Json(serde_json::to_value(enfant).unwrap()))
        .map_err(erreur)
}

pub async fn delete_enfant(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "enfants.delete")?;
    EnfantService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "Enfant désactivé" })))
        .map_err(erreur)
}

/// POST /enfants/reclasser — reclassement par âge de tous les enfants actifs.
pub async fn reclasser(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "enfants.reclasser")?;
    let resume = EnfantService::reclasser_tous(&state.db, Utc::now().date_naive())
        .await
        .map_err(erreur)?;
    RECLASSEMENTS_COUNTER.inc();
    Ok(Json(serde_json::to_value(resume).unwrap()))
}
