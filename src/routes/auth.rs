use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    middleware::rate_limit::{check_rate_limit, LOGIN_MAX_ATTEMPTS, LOGIN_WINDOW_SECS},
    models::{
        auth::AuthenticatedUser,
        user::{ChangePasswordRequest, LoginRequest, RefreshTokenRequest, UserProfile},
    },
    services::{auth::AuthService, metrics::LOGINS_COUNTER},
    AppState,
};

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut redis = state.redis.clone();
    let key = format!("login:{}", body.email.to_lowercase());
    check_rate_limit(&mut redis, &key, LOGIN_MAX_ATTEMPTS, LOGIN_WINDOW_SECS).await?;

    match AuthService::login(
        &state.db,
        &body.email,
        &body.password,
        &state.config.jwt_secret,
        &state.config.jwt_refresh_secret,
        state.config.jwt_expiry_seconds,
        state.config.jwt_refresh_expiry_days,
    )
    .await
    {
        Ok(response) => {
            LOGINS_COUNTER.with_label_values(&["success"]).inc();
            Ok(Json(serde_json::to_value(response).unwrap()))
        }
        Err(e) => {
            LOGINS_COUNTER.with_label_values(&["failure"]).inc();
            Err((StatusCode::UNAUTHORIZED, Json(json!({ "error": e.to_string() }))))
        }
    }
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    AuthService::refresh(
        &state.db,
        &body.refresh_token,
        &state.config.jwt_secret,
        &state.config.jwt_refresh_secret,
        state.config.jwt_expiry_seconds,
        state.config.jwt_refresh_expiry_days,
    )
    .await
    .map(|r| Json(serde_json::to_value(r).unwrap()))
    .map_err(|e| (StatusCode::UNAUTHORIZED, Json(json!({ "error": e.to_string() }))))
}

pub async fn logout(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    AuthService::logout(&state.db, user.user_id)
        .await
        .map(|_| Json(json!({ "message": "Déconnecté" })))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

pub async fn me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserProfile>, (StatusCode, Json<Value>)> {
    match crate::services::users::UserService::get(&state.db, user.user_id).await {
        Ok(Some(profile)) => Ok(Json(profile)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Compte introuvable" })),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

/// GET /auth/permissions — le miroir consommé par le `can()` du dashboard.
/// La vérification serveur reste faite route par route, quoi qu'il affiche.
pub async fn my_permissions(user: AuthenticatedUser) -> Json<Value> {
    let permissions: Vec<&String> = user.role.permissions().iter().collect();
    Json(json!({
        "role": user.role,
        "permissions": permissions,
    }))
}

pub async fn change_password(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    AuthService::change_password(
        &state.db,
        user.user_id,
        &body.current_password,
        &body.new_password,
    )
    .await
    .map(|_| Json(json!({ "message": "Mot de passe modifié" })))
    .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))))
}
