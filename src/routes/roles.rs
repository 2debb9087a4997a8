use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    middleware::auth::require_permission,
    models::{auth::AuthenticatedUser, role::Role},
    services::rbac::RbacService,
    AppState,
};

pub async fn list_roles(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "roles.view")?;

    RbacService::list_roles(&state.db)
        .await
        .map(|roles| Json(serde_json::to_value(roles).unwrap()))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

pub async fn get_role(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(nom): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "roles.view")?;

    let role: Role = nom
        .parse()
        .map_err(|_| (StatusCode::NOT_FOUND, Json(json!({ "error": "Rôle inconnu" }))))?;

    RbacService::role_with_permissions(&state.db, role)
        .await
        .map(|r| Json(serde_json::to_value(r).unwrap()))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

/// GET /permissions — le catalogue complet, groupé par module.
pub async fn list_permissions(
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "roles.view")?;

    let modules: Vec<Value> = crate::models::role::PERMISSION_CATALOG
        .iter()
        .map(|(module, actions)| {
            json!({
                "module": module,
                "permissions": actions
                    .iter()
                    .map(|a| format!("{module}.{a}"))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    Ok(Json(json!({ "modules": modules })))
}
