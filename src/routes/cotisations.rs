use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    middleware::auth::require_permission,
    models::{
        auth::AuthenticatedUser,
        cotisation::{
            CreateCotisationRequest, CreateCotisationTypeRequest, UpdateCotisationRequest,
            UpdateCotisationTypeRequest,
        },
    },
    services::cotisations::CotisationService,
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

// ── Types de cotisation ─────────────────────────────────────────────────────

pub async fn list_types(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "cotisations.view")?;
    CotisationService::list_types(&state.db)
        .await
        .map(|t| Json(serde_json::to_value(t).unwrap()))
        .map_err(erreur)
}

pub async fn create_type(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateCotisationTypeRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "cotisations.create")?;
    CotisationService::create_type(&state.db, &body)
        .await
        .map(|t| (StatusCode::CREATED, Json(serde_json::to_value(t).unwrap())))
        .map_err(erreur)
}

pub async fn update_type(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCotisationTypeRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "cotisations.update")?;
    CotisationService::update_type(&state.db, id, &body)
        .await
        .map(|t| Json(serde_json::to_value(t).unwrap()))
        .map_err(erreur)
}

pub async fn delete_type(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "cotisations.delete")?;
    CotisationService::delete_type(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "Type de cotisation supprimé" })))
        .map_err(erreur)
}

// ── Versements ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CotisationQuery {
    pub periode: Option<String>,
}

pub async fn list_cotisations(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<CotisationQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "cotisations.view")?;
    CotisationService::list(&state.db, query.periode.as_deref())
        .await
        .map(|c| Json(serde_json::to_value(c).unwrap()))
        .map_err(erreur)
}

pub async fn get_cotisation(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "cotisations.view")?;
    match CotisationService::get(&state.db, id).await {
        Ok(Some(c)) => Ok(Json(serde_json::to_value(c).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Cotisation introuvable" })),
        )),
        Err(e) => Err(erreur(e)),
    }
}

pub async fn create_cotisation(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateCotisationRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "cotisations.create")?;
    CotisationService::create(&state.db, &body)
        .await
        .map(|c| (StatusCode::CREATED, Json(serde_json::to_value(c).unwrap())))
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))))
}

pub async fn update_cotisation(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCotisationRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "cotisations.update")?;
    CotisationService::update(&state.db, id, &body)
        .await
        .map(|c| Json(serde_json::to_value(c).unwrap()))
        .map_err(erreur)
}

pub async fn delete_cotisation(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "cotisations.delete")?;
    CotisationService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "Cotisation supprimée" })))
        .map_err(erreur)
}
