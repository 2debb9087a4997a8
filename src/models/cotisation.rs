use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CotisationType {
    pub id: Uuid,
    pub nom: String,
    pub montant_standard: i64,
    /// "mensuelle" | "trimestrielle" | "annuelle" | "ponctuelle"
    pub periodicite: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCotisationTypeRequest {
    pub nom: String,
    pub montant_standard: Option<i64>,
    pub periodicite: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCotisationTypeRequest {
    pub nom: Option<String>,
    pub montant_standard: Option<i64>,
    pub periodicite: Option<String>,
}

/// Versement d'une cotisation par un moniteur. `type_nom` et `moniteur_nom`
/// sont des copies dénormalisées rafraîchies lors des renommages.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cotisation {
    pub id: Uuid,
    pub cotisation_type_id: Uuid,
    pub type_nom: String,
    pub moniteur_id: Uuid,
    pub moniteur_nom: String,
    pub montant: i64,
    /// Période couverte, format "AAAA-MM"
    pub periode: String,
    pub date_versement: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCotisationRequest {
    pub cotisation_type_id: Uuid,
    pub moniteur_id: Uuid,
    pub montant: i64,
    pub periode: String,
    pub date_versement: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCotisationRequest {
    pub montant: Option<i64>,
    pub periode: Option<String>,
    pub date_versement: Option<NaiveDate>,
}
