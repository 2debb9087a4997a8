use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Moniteur {
    pub id: Uuid,
    pub nom: String,
    pub prenom: String,
    pub sexe: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    /// "responsable", "adjoint" ou "moniteur"
    pub fonction: String,
    pub salle_id: Option<Uuid>,
    pub salle_nom: Option<String>,
    pub date_integration: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMoniteurRequest {
    pub nom: String,
    pub prenom: String,
    pub sexe: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub fonction: Option<String>,
    pub salle_id: Option<Uuid>,
    pub date_integration: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMoniteurRequest {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub sexe: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub fonction: Option<String>,
    pub salle_id: Option<Uuid>,
    pub date_integration: Option<NaiveDate>,
    pub is_active: Option<bool>,
}
