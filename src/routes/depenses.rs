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
        depense::{CreateDepenseRequest, UpdateDepenseRequest},
    },
    services::depenses::DepenseService,
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

pub async fn list_depenses(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "depenses.view")?;
    DepenseService::list(&state.db)
        .await
        .map(|d| Json(serde_json::to_value(d).unwrap()))
        .map_err(erreur)
}

pub async fn get_depense(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "depenses.view")?;
    match DepenseService::get(&state.db, id).await {
        Ok(Some(d)) => Ok(Json(serde_json::to_value(d).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Dépense introuvable" })),
        )),
        Err(e) => Err(erreur(e)),
    }
}

pub async fn create_depense(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateDepenseRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "depenses.create")?;
    DepenseService::create(&state.db, &body)
        .await
        .map(|d| (StatusCode::CREATED, Json(serde_json::to_value(d).unwrap())))
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))))
}

pub async fn update_depense(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateDepenseRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "depenses.update")?;
    DepenseService::update(&state.db, id, &body)
        .await
        .map(|d| Json(serde_json::to_value(d).unwrap()))
        .map_err(erreur)
}

pub async fn delete_depense(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "depenses.delete")?;
    DepenseService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "Dépense supprimée" })))
        .map_err(erreur)
}
