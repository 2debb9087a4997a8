use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
#[error("Type de personne inconnu : {0}")]
pub struct TypePersonneInconnu(String);

/// Référence polymorphe vers la personne pointée par une présence ou une
/// participation : un moniteur ou un enfant, jamais les deux. Persistée en
/// paire (`personne_type`, `personne_id`) ; la conversion se fait ici, à la
/// frontière d'accès aux données.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ParticipantRef {
    Moniteur(Uuid),
    Enfant(Uuid),
}

impl ParticipantRef {
    pub fn kind(&self) -> &'static str {
        match self {
            ParticipantRef::Moniteur(_) => "moniteur",
            ParticipantRef::Enfant(_) => "enfant",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            ParticipantRef::Moniteur(id) | ParticipantRef::Enfant(id) => *id,
        }
    }

    pub fn from_parts(kind: &str, id: Uuid) -> Result<Self, TypePersonneInconnu> {
        match kind {
            "moniteur" => Ok(ParticipantRef::Moniteur(id)),
            "enfant" => Ok(ParticipantRef::Enfant(id)),
            _ => Err(TypePersonneInconnu(kind.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Presence {
    pub id: Uuid,
    pub date_presence: NaiveDate,
    pub personne_type: String,
    pub personne_id: Uuid,
    pub personne_nom: String,
    pub salle_id: Option<Uuid>,
    /// "present" | "absent" | "excuse"
    pub statut: String,
    pub created_at: DateTime<Utc>,
}

impl Presence {
    pub fn participant(&self) -> anyhow::Result<ParticipantRef> {
        Ok(ParticipantRef::from_parts(&self.personne_type, self.personne_id)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePresenceRequest {
    pub date_presence: NaiveDate,
    #[serde(flatten)]
    pub participant: ParticipantRef,
    pub salle_id: Option<Uuid>,
    pub statut: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePresenceRequest {
    pub statut: Option<String>,
    pub salle_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_depuis_les_colonnes() {
        let id = Uuid::new_v4();
        let p = ParticipantRef::from_parts("enfant", id).unwrap();
        assert_eq!(p, ParticipantRef::Enfant(id));
        assert_eq!(p.kind(), "enfant");
        assert_eq!(p.id(), id);

        // Un type hors ("moniteur", "enfant") est rejeté à la frontière
        assert!(ParticipantRef::from_parts("parent", id).is_err());
    }

    #[test]
    fn serialisation_etiquetee() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(ParticipantRef::Moniteur(id)).unwrap();
        assert_eq!(json["type"], "moniteur");
        assert_eq!(json["id"], id.to_string());

        let back: ParticipantRef = serde_json::from_value(json).unwrap();
        assert_eq!(back, ParticipantRef::Moniteur(id));
    }
}
