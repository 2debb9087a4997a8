use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Rapport de culte du dimanche : effectifs et offrande.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Culte {
    pub id: Uuid,
    pub date_culte: NaiveDate,
    pub theme: Option<String>,
    pub orateur: Option<String>,
    pub nb_enfants: i32,
    pub nb_moniteurs: i32,
    pub nb_visiteurs: i32,
    /// Offrande en FCFA
    pub offrande: i64,
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCulteRequest {
    pub date_culte: NaiveDate,
    pub theme: Option<String>,
    pub orateur: Option<String>,
    pub nb_enfants: Option<i32>,
    pub nb_moniteurs: Option<i32>,
    pub nb_visiteurs: Option<i32>,
    pub offrande: Option<i64>,
    pub observations: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCulteRequest {
    pub date_culte: Option<NaiveDate>,
    pub theme: Option<String>,
    pub orateur: Option<String>,
    pub nb_enfants: Option<i32>,
    pub nb_moniteurs: Option<i32>,
    pub nb_visiteurs: Option<i32>,
    pub offrande: Option<i64>,
    pub observations: Option<String>,
}
