use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::presence::ParticipantRef;

/// Paiement reçu (inscription à une activité, vente, don fléché...).
/// Le payeur est une référence polymorphe optionnelle.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Paiement {
    pub id: Uuid,
    pub libelle: String,
    /// Montant en FCFA
    pub montant: i64,
    pub date_paiement: NaiveDate,
    /// "especes" | "mobile_money" | "virement" | "cheque"
    pub mode: String,
    pub activite_id: Option<Uuid>,
    pub personne_type: Option<String>,
    pub personne_id: Option<Uuid>,
    pub personne_nom: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Paiement {
    pub fn payeur(&self) -> Option<ParticipantRef> {
        match (&self.personne_type, self.personne_id) {
            (Some(kind), Some(id)) => ParticipantRef::from_parts(kind, id).ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePaiementRequest {
    pub libelle: String,
    pub montant: i64,
    pub date_paiement: NaiveDate,
    pub mode: Option<String>,
    pub activite_id: Option<Uuid>,
    pub payeur: Option<ParticipantRef>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaiementRequest {
    pub libelle: Option<String>,
    pub montant: Option<i64>,
    pub date_paiement: Option<NaiveDate>,
    pub mode: Option<String>,
    pub activite_id: Option<Uuid>,
}
