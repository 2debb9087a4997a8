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
        activite::{AddParticipantRequest, CreateActiviteRequest, UpdateActiviteRequest},
        auth::AuthenticatedUser,
        presence::ParticipantRef,
    },
    services::activites::ActiviteService,
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

pub async fn list_activites(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "activites.view")?;
    ActiviteService::list(&state.db)
        .await
        .map(|a| Json(serde_json::to_value(a).unwrap()))
        .map_err(erreur)
}

pub async fn get_activite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "activites.view")?;
    match ActiviteService::get(&state.db, id).await {
        Ok(Some(a)) => Ok(Json(serde_json::to_value(a).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Activité introuvable" })),
        )),
        Err(e) => Err(erreur(e)),
    }
}

pub async fn create_activite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateActiviteRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "activites.create")?;
    ActiviteService::create(&state.db, &body)
        .await
        .map(|a| (StatusCode::CREATED, Json(serde_json::to_value(a).unwrap())))
        .map_err(erreur)
}

pub async fn update_activite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateActiviteRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "activites.update")?;
    ActiviteService::update(&state.db, id, &body)
        .await
        .map(|a| Json(serde_json::to_value(a).unwrap()))
        .map_err(erreur)
}

pub async fn delete_activite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "activites.delete")?;
    ActiviteService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "Activité supprimée" })))
        .map_err(erreur)
}

// ── Participants ────────────────────────────────────────────────────────────

pub async fn list_participants(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "activites.view")?;
    ActiviteService::list_participants(&state.db, id)
        .await
        .map(|p| Json(serde_json::to_value(p).unwrap()))
        .map_err(erreur)
}

pub async fn add_participant(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<AddParticipantRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "activites.update")?;
    ActiviteService::add_participant(&state.db, id, &body.participant)
        .await
        .map(|p| (StatusCode::CREATED, Json(serde_json::to_value(p).unwrap())))
        .map_err(erreur)
}

/// DELETE /activites/{id}/participants/{type}/{participant_id}
pub async fn remove_participant(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((id, kind, participant_id)): Path<(Uuid, String, Uuid)>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "activites.update")?;

    let participant = ParticipantRef::from_parts(&kind, participant_id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
    })?;

    ActiviteService::remove_participant(&state.db, id, &participant)
        .await
        .map(|_| Json(json!({ "message": "Participant retiré" })))
        .map_err(erreur)
}
