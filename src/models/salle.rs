use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Salle {
    pub id: Uuid,
    pub nom: String,
    pub capacite: Option<i32>,
    pub responsable_id: Option<Uuid>,
    pub adjoint_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSalleRequest {
    pub nom: String,
    pub capacite: Option<i32>,
    pub responsable_id: Option<Uuid>,
    pub adjoint_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSalleRequest {
    pub nom: Option<String>,
    pub capacite: Option<i32>,
    pub responsable_id: Option<Uuid>,
    pub adjoint_id: Option<Uuid>,
}

/// Effectif d'une salle pour `/salles` et les statistiques.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SalleEffectif {
    pub id: Uuid,
    pub nom: String,
    pub capacite: Option<i32>,
    pub nb_enfants: i64,
    pub nb_moniteurs: i64,
}
