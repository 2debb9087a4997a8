use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Profil de l'application — ligne unique (id = 1).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Settings {
    pub id: i32,
    pub nom_application: String,
    pub devise: String,
    pub adresse: Option<String>,
    pub telephone: Option<String>,
    pub email_contact: Option<String>,
    pub logo_url: Option<String>,
    pub hero_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub nom_application: Option<String>,
    pub devise: Option<String>,
    pub adresse: Option<String>,
    pub telephone: Option<String>,
    pub email_contact: Option<String>,
}

/// Sous-ensemble exposé sans authentification (`GET /public-settings`).
#[derive(Debug, Serialize)]
pub struct PublicSettings {
    pub nom_application: String,
    pub logo_url: Option<String>,
    pub hero_url: Option<String>,
}

impl From<Settings> for PublicSettings {
    fn from(s: Settings) -> Self {
        Self {
            nom_application: s.nom_application,
            logo_url: s.logo_url,
            hero_url: s.hero_url,
        }
    }
}
