use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// `salle_id`/`salle_nom` vont par paire : le nom est une copie dénormalisée
/// pour l'affichage, rafraîchie lors d'un renommage de salle ou d'un
/// reclassement. "ADO PARTI" est un nom sans salle_id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enfant {
    pub id: Uuid,
    pub nom: String,
    pub prenom: String,
    pub sexe: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub salle_id: Option<Uuid>,
    pub salle_nom: Option<String>,
    pub nom_pere: Option<String>,
    pub nom_mere: Option<String>,
    pub telephone_parent: Option<String>,
    pub quartier: Option<String>,
    pub baptise: bool,
    pub date_bapteme: Option<NaiveDate>,
    pub allergies: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEnfantRequest {
    pub nom: String,
    pub prenom: String,
    pub sexe: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub salle_id: Option<Uuid>,
    pub nom_pere: Option<String>,
    pub nom_mere: Option<String>,
    pub telephone_parent: Option<String>,
    pub quartier: Option<String>,
    pub baptise: Option<bool>,
    pub date_bapteme: Option<NaiveDate>,
    pub allergies: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEnfantRequest {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub sexe: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub salle_id: Option<Uuid>,
    pub nom_pere: Option<String>,
    pub nom_mere: Option<String>,
    pub telephone_parent: Option<String>,
    pub quartier: Option<String>,
    pub baptise: Option<bool>,
    pub date_bapteme: Option<NaiveDate>,
    pub allergies: Option<String>,
    pub is_active: Option<bool>,
}

/// Bilan du reclassement par âge (`POST /enfants/reclasser`).
#[derive(Debug, Default, Serialize)]
pub struct ReclassementResume {
    pub examines: u64,
    pub reaffectes: u64,
    pub ados_partis: u64,
    pub non_affectes: u64,
    pub inchanges: u64,
    /// Noms de salles visés sans ligne `salles` correspondante.
    pub salles_manquantes: Vec<String>,
}
