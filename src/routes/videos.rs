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
        video::{CreateVideoRequest, UpdateVideoRequest},
    },
    services::videos::VideoService,
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

pub async fn list_videos(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "videos.view")?;
    VideoService::list(&state.db)
        .await
        .map(|v| Json(serde_json::to_value(v).unwrap()))
        .map_err(erreur)
}

pub async fn get_video(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "videos.view")?;
    match VideoService::get(&state.db, id).await {
        Ok(Some(v)) => Ok(Json(serde_json::to_value(v).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Vidéo introuvable" })),
        )),
        Err(e) => Err(erreur(e)),
    }
}

pub async fn create_video(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "videos.create")?;
    VideoService::create(&state.db, &body)
        .await
        .map(|v| (StatusCode::CREATED, Json(serde_json::to_value(v).unwrap())))
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))))
}

pub async fn update_video(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateVideoRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "videos.update")?;
    VideoService::update(&state.db, id, &body)
        .await
        .map(|v| Json(serde_json::to_value(v).unwrap()))
        .map_err(erreur)
}

pub async fn delete_video(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "videos.delete")?;
    VideoService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "Vidéo supprimée" })))
        .map_err(erreur)
}
