use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::presence::ParticipantRef;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Activite {
    pub id: Uuid,
    pub titre: String,
    pub description: Option<String>,
    /// "sortie", "camp", "formation", "fete", ...
    pub type_activite: String,
    pub date_debut: NaiveDate,
    pub date_fin: Option<NaiveDate>,
    pub lieu: Option<String>,
    pub salle_id: Option<Uuid>,
    /// Coût en FCFA
    pub cout: i64,
    /// "prevue" | "en_cours" | "terminee" | "annulee"
    pub statut: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateActiviteRequest {
    pub titre: String,
    pub description: Option<String>,
    pub type_activite: Option<String>,
    pub date_debut: NaiveDate,
    pub date_fin: Option<NaiveDate>,
    pub lieu: Option<String>,
    pub salle_id: Option<Uuid>,
    pub cout: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateActiviteRequest {
    pub titre: Option<String>,
    pub description: Option<String>,
    pub type_activite: Option<String>,
    pub date_debut: Option<NaiveDate>,
    pub date_fin: Option<NaiveDate>,
    pub lieu: Option<String>,
    pub salle_id: Option<Uuid>,
    pub cout: Option<i64>,
    pub statut: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActiviteParticipant {
    pub activite_id: Uuid,
    pub personne_type: String,
    pub personne_id: Uuid,
    pub personne_nom: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AddParticipantRequest {
    #[serde(flatten)]
    pub participant: ParticipantRef,
}
