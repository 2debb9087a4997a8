use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlogCategorie {
    pub id: Uuid,
    pub nom: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBlogCategorieRequest {
    pub nom: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub titre: String,
    pub contenu: String,
    pub categorie_id: Option<Uuid>,
    pub categorie_nom: Option<String>,
    pub auteur_id: Option<Uuid>,
    pub auteur_nom: Option<String>,
    pub image_url: Option<String>,
    pub publie: bool,
    pub date_publication: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub titre: String,
    pub contenu: String,
    pub categorie_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub publie: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub titre: Option<String>,
    pub contenu: Option<String>,
    pub categorie_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub publie: Option<bool>,
}
