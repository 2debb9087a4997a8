use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    middleware::auth::require_permission,
    models::{
        auth::AuthenticatedUser,
        presence::{CreatePresenceRequest, UpdatePresenceRequest},
    },
    services::presences::PresenceService,
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

#[derive(Deserialize)]
pub struct PresenceQuery {
    pub date: Option<NaiveDate>,
}

pub async fn list_presences(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<PresenceQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "presences.view")?;
    PresenceService::list(&state.db, query.date)
        .await
        .map(|p| Json(serde_json::to_value(p).unwrap()))
        .map_err(erreur)
}

pub async fn get_presence(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "presences.view")?;
    match PresenceService::get(&state.db, id).await {
        Ok(Some(p)) => Ok(Json(serde_json::to_value(p).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Présence introuvable" })),
        )),
        Err(e) => Err(erreur(e)),
    }
}

pub async fn create_presence(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreatePresenceRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "presences.create")?;
    PresenceService::create(&state.db, &body)
        .await
        .map(|p| (StatusCode::CREATED, Json(serde_json::to_value(p).unwrap())))
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))))
}

pub async fn update_presence(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePresenceRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "presences.update")?;
    PresenceService::update(&state.db, id, &body)
        .await
        .map(|p| Json(serde_json::to_value(p).unwrap()))
        .map_err(erreur)
}

pub async fn delete_presence(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "presences.delete")?;
    PresenceService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "Présence supprimée" })))
        .map_err(erreur)
}
