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
        blog::{CreateBlogCategorieRequest, CreateBlogRequest, UpdateBlogRequest},
    },
    services::blogs::BlogService,
    AppState,
};

fn erreur(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

// ── Catégories ──────────────────────────────────────────────────────────────

pub async fn list_categories(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "blog.view")?;
    BlogService::list_categories(&state.db)
        .await
        .map(|c| Json(serde_json::to_value(c).unwrap()))
        .map_err(erreur)
}

pub async fn create_categorie(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateBlogCategorieRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "blog.create")?;
    BlogService::create_categorie(&state.db, &body)
        .await
        .map(|c| (StatusCode::CREATED, Json(serde_json::to_value(c).unwrap())))
        .map_err(erreur)
}

pub async fn rename_categorie(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<CreateBlogCategorieRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "blog.update")?;
    BlogService::rename_categorie(&state.db, id, &body.nom)
        .await
        .map(|c| Json(serde_json::to_value(c).unwrap()))
        .map_err(erreur)
}

pub async fn delete_categorie(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "blog.delete")?;
    BlogService::delete_categorie(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "Catégorie supprimée" })))
        .map_err(erreur)
}

// ── Articles ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct BlogQuery {
    pub publies: Option<bool>,
}

pub async fn list_blogs(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<BlogQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "blog.view")?;
    BlogService::list(&state.db, query.publies.unwrap_or(false))
        .await
        .map(|b| Json(serde_json::to_value(b).unwrap()))
        .map_err(erreur)
}

pub async fn get_blog(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "blog.view")?;
    match BlogService::get(&state.db, id).await {
        Ok(Some(b)) => Ok(Json(serde_json::to_value(b).unwrap())),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Article introuvable" })),
        )),
        Err(e) => Err(erreur(e)),
    }
}

pub async fn create_blog(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    require_permission(&user, "blog.create")?;
    BlogService::create(&state.db, user.user_id, &body)
        .await
        .map(|b| (StatusCode::CREATED, Json(serde_json::to_value(b).unwrap())))
        .map_err(erreur)
}

pub async fn update_blog(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBlogRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "blog.update")?;
    BlogService::update(&state.db, id, &body)
        .await
        .map(|b| Json(serde_json::to_value(b).unwrap()))
        .map_err(erreur)
}

pub async fn delete_blog(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    require_permission(&user, "blog.delete")?;
    BlogService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "Article supprimé" })))
        .map_err(erreur)
}
