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
        moniteur::{CreateMoniteurRequest, UpdateMoniteurRequest},
    },
    services::moniteurs::MoniteurService,
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

pub async fn list_moniteurs(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "moniteurs.view")?;
    MoniteurService::list(&state.db)
        .await
        .map(|m| Json(serde_json::to_value(m).unwrap()))
        .map_err(erreur)
}

pub async fn get_moniteur(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "moniteurs.view")?;
    match MoniteurService::get(&state.db, id).await {
        Ok(Some(m)) => Ok(Json(serde_json::to_value(m).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Moniteur introuvable" })),
        )),
        Err(e) => Err(erreur(e)),
    }
}

pub async fn create_moniteur(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateMoniteurRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "moniteurs.create")?;
    MoniteurService::create(&state.db, &body)
        .await
        .map(|m| (StatusCode::CREATED, Json(serde_json::to_value(m).unwrap())))
        .map_err(erreur)
}

pub async fn update_moniteur(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMoniteurRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "moniteurs.update")?;
    MoniteurService::update(&state.db, id, &body)
        .await
        .map(|m| Json(serde_json::to_value(m).unwrap()))
        .map_err(erreur)
}

pub async fn delete_moniteur(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "moniteurs.delete")?;
    MoniteurService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "Moniteur désactivé" })))
        .map_err(erreur)
}
