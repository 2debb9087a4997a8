use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Depense {
    pub id: Uuid,
    pub libelle: String,
    /// Montant en FCFA
    pub montant: i64,
    pub date_depense: NaiveDate,
    /// "fonctionnement" | "materiel" | "activite" | "autre"
    pub categorie: String,
    pub beneficiaire: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDepenseRequest {
    pub libelle: String,
    pub montant: i64,
    pub date_depense: NaiveDate,
    pub categorie: Option<String>,
    pub beneficiaire: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDepenseRequest {
    pub libelle: Option<String>,
    pub montant: Option<i64>,
    pub date_depense: Option<NaiveDate>,
    pub categorie: Option<String>,
    pub beneficiaire: Option<String>,
}
