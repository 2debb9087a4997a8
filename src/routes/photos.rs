use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    middleware::auth::require_permission,
    models::{auth::AuthenticatedUser, photo::UpdatePhotoRequest},
    services::photos::PhotoService,
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

#[derive(Deserialize)]
pub struct PhotoQuery {
    pub activite_id: Option<Uuid>,
}

pub async fn list_photos(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<PhotoQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "photos.view")?;
    PhotoService::list(&state.db, query.activite_id)
        .await
        .map(|p| Json(serde_json::to_value(p).unwrap()))
        .map_err(erreur)
}

pub async fn get_photo(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "photos.view")?;
    match PhotoService::get(&state.db, id).await {
        Ok(Some(p)) => Ok(Json(serde_json::to_value(p).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Photo introuvable" })),
        )),
        Err(e) => Err(erreur(e)),
    }
}

pub async fn upload_photo(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "photos.create")?;
    PhotoService::upload(&state.db, user.user_id, &state.config.data_dir, multipart)
        .await
        .map(|p| (StatusCode::CREATED, Json(serde_json::to_value(p).unwrap())))
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))))
}

pub async fn update_photo(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePhotoRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "photos.update")?;
    PhotoService::update(&state.db, id, &body)
        .await
        .map(|p| Json(serde_json::to_value(p).unwrap()))
        .map_err(erreur)
}

pub async fn delete_photo(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "photos.delete")?;
    PhotoService::delete(&state.db, &state.config.data_dir, id)
        .await
        .map(|_| Json(json!({ "message": "Photo supprimée" })))
        .map_err(erreur)
}
