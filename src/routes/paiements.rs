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
        paiement::{CreatePaiementRequest, UpdatePaiementRequest},
    },
    services::paiements::PaiementService,
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

pub async fn list_paiements(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "paiements.view")?;
    PaiementService::list(&state.db)
        .await
        .map(|p| Json(serde_json::to_value(p).unwrap()))
        .map_err(erreur)
}

pub async fn get_paiement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "paiements.view")?;
    match PaiementService::get(&state.db, id).await {
        Ok(Some(p)) => Ok(Json(serde_json::to_value(p).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Paiement introuvable" })),
        )),
        Err(e) => Err(erreur(e)),
    }
}

pub async fn create_paiement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreatePaiementRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "paiements.create")?;
    PaiementService::create(&state.db, &body)
        .await
        .map(|p| (StatusCode::CREATED, Json(serde_json::to_value(p).unwrap())))
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))))
}

pub async fn update_paiement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePaiementRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "paiements.update")?;
    PaiementService::update(&state.db, id, &body)
        .await
        .map(|p| Json(serde_json::to_value(p).unwrap()))
        .map_err(erreur)
}

pub async fn delete_paiement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "paiements.delete")?;
    PaiementService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "Paiement supprimé" })))
        .map_err(erreur)
}
