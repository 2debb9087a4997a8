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
        salle::{CreateSalleRequest, UpdateSalleRequest},
    },
    services::salles::SalleService,
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

pub async fn list_salles(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "salles.view")?;
    SalleService::list(&state.db)
        .await
        .map(|s| Json(serde_json::to_value(s).unwrap()))
        .map_err(erreur)
}

pub async fn get_salle(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "salles.view")?;
    match SalleService::get(&state.db, id).await {
        Ok(Some(s)) => Ok(Json(serde_json::to_value(s).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Salle introuvable" })),
        )),
        Err(e) => Err(erreur(e)),
    }
}

pub async fn create_salle(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateSalleRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "salles.create")?;
    SalleService::create(&state.db, &body)
        .await
        .map(|s| (StatusCode::CREATED, Json(serde_json::to_value(s).unwrap())))
        .map_err(erreur)
}

pub async fn update_salle(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateSalleRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "salles.update")?;
    SalleService::update(&state.db, id, &body)
        .await
        .map(|s| Json(serde_json::to_value(s).unwrap()))
        .map_err(erreur)
}

pub async fn delete_salle(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "salles.delete")?;
    SalleService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "Salle supprimée" })))
        .map_err(erreur)
}

/// GET /salles-effectifs — effectif enfants/moniteurs par salle.
pub async fn effectifs(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "salles.view")?;
    SalleService::effectifs(&state.db)
        .await
        .map(|e| Json(serde_json::to_value(e).unwrap()))
        .map_err(erreur)
}
