use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    middleware::auth::require_permission,
    models::{
        auth::AuthenticatedUser,
        culte::{CreateCulteRequest, UpdateCulteRequest},
    },
    services::cultes::CulteService,
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

pub async fn list_cultes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "cultes.view")?;
    CulteService::list(&state.db)
        .await
        .map(|c| Json(serde_json::to_value(c).unwrap()))
        .map_err(erreur)
}

pub async fn get_culte(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "cultes.view")?;
    match CulteService::get(&state.db, id).await {
        Ok(Some(c)) => Ok(Json(serde_json::to_value(c).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Rapport de culte introuvable" })),
        )),
        Err(e) => Err(erreur(e)),
    }
}

pub async fn create_culte(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateCulteRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "cultes.create")?;
    CulteService::create(&state.db, &body)
        .await
        .map(|c| (StatusCode::CREATED, Json(serde_json::to_value(c).unwrap())))
        .map_err(erreur)
}

pub async fn update_culte(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCulteRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "cultes.update")?;
    CulteService::update(&state.db, id, &body)
        .await
        .map(|c| Json(serde_json::to_value(c).unwrap()))
        .map_err(erreur)
}

pub async fn delete_culte(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "cultes.delete")?;
    CulteService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "Rapport de culte supprimé" })))
        .map_err(erreur)
}
