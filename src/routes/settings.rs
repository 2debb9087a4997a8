use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    middleware::auth::require_permission,
    models::{
        auth::AuthenticatedUser,
        settings::{PublicSettings, UpdateSettingsRequest},
    },
    services::settings::SettingsService,
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

/// GET /settings — any authenticated user
pub async fn get_settings(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SettingsService::get(&state.db)
        .await
        .map(|s| Json(serde_json::to_value(s).unwrap()))
        .map_err(erreur)
}

/// GET /public-settings — page d'accueil, sans authentification.
pub async fn get_public_settings(
    State(state): State<AppState>,
) -> Result<Json<PublicSettings>, (StatusCode, Json<Value>)> {
    SettingsService::get(&state.db)
        .await
        .map(|s| Json(PublicSettings::from(s)))
        .map_err(erreur)
}

/// PUT /settings/update — admin only
pub async fn update_settings(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<UpdateSettingsRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "users.update")?;
    SettingsService::update(&state.db, &body)
        .await
        .map(|s| Json(serde_json::to_value(s).unwrap()))
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))))
}

/// POST /settings/upload — logo et image d'accueil (multipart).
pub async fn upload_settings_images(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "users.update")?;
    SettingsService::upload(&state.db, &state.config.data_dir, multipart)
        .await
        .map(|s| Json(serde_json::to_value(s).unwrap()))
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))))
}
