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
        user::{CreateUserRequest, ResetPasswordResponse, UpdateUserRequest},
    },
    services::users::UserService,
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

pub async fn list_users(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "users.view")?;
    UserService::list(&state.db)
        .await
        .map(|users| Json(serde_json::to_value(users).unwrap()))
        .map_err(erreur)
}

pub async fn get_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "users.view")?;
    match UserService::get(&state.db, id).await {
        Ok(Some(profile)) => Ok(Json(serde_json::to_value(profile).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Utilisateur introuvable" })),
        )),
        Err(e) => Err(erreur(e)),
    }
}

pub async fn create_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "users.create")?;
    UserService::create(&state.db, &body)
        .await
        .map(|u| (StatusCode::CREATED, Json(serde_json::to_value(u).unwrap())))
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))))
}

pub async fn update_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "users.update")?;
    UserService::update(&state.db, id, &body)
        .await
        .map(|u| Json(serde_json::to_value(u).unwrap()))
        .map_err(erreur)
}

pub async fn deactivate_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "users.delete")?;
    if id == user.user_id {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Impossible de désactiver son propre compte" })),
        ));
    }
    UserService::deactivate(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "Compte désactivé" })))
        .map_err(erreur)
}

pub async fn reset_user_password(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResetPasswordResponse>, (StatusCode, Json<Value>)> {
    require_permission(&user, "users.update")?;
    UserService::reset_password(&state.db, id)
        .await
        .map(|temp_password| {
            Json(ResetPasswordResponse {
                message: "Mot de passe réinitialisé".into(),
                temp_password,
            })
        })
        .map_err(erreur)
}
