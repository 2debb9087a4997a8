use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Rôles du ministère. Stocké en TEXT côté base (voir `users.role`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "COORDINATION")]
    Coordination,
    #[serde(rename = "CHEF_SALLE")]
    ChefSalle,
    #[serde(rename = "MONITEUR")]
    Moniteur,
    #[serde(rename = "FINANCIER")]
    Financier,
    #[serde(rename = "PARENT")]
    Parent,
    #[serde(rename = "ENFANT")]
    Enfant,
}

pub const ALL_ROLES: [Role; 7] = [
    Role::Admin,
    Role::Coordination,
    Role::ChefSalle,
    Role::Moniteur,
    Role::Financier,
    Role::Parent,
    Role::Enfant,
];

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Admin => "ADMIN",
            Role::Coordination => "COORDINATION",
            Role::ChefSalle => "CHEF_SALLE",
            Role::Moniteur => "MONITEUR",
            Role::Financier => "FINANCIER",
            Role::Parent => "PARENT",
            Role::Enfant => "ENFANT",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "COORDINATION" => Ok(Role::Coordination),
            "CHEF_SALLE" => Ok(Role::ChefSalle),
            "MONITEUR" => Ok(Role::Moniteur),
            "FINANCIER" => Ok(Role::Financier),
            "PARENT" => Ok(Role::Parent),
            "ENFANT" => Ok(Role::Enfant),
            _ => Err(anyhow::anyhow!("Rôle inconnu : {s}")),
        }
    }
}

/// Catalogue des permissions, par module. Les noms suivent la convention
/// `module.action` consommée telle quelle par le `can()` du dashboard.
pub const PERMISSION_CATALOG: &[(&str, &[&str])] = &[
    ("dashboard", &["view"]),
    ("enfants", &["view", "create", "update", "delete", "reclasser"]),
    ("moniteurs", &["view", "create", "update", "delete"]),
    ("activites", &["view", "create", "update", "delete"]),
    ("presences", &["view", "create", "update", "delete"]),
    ("salles", &["view", "create", "update", "delete"]),
    ("paiements", &["view", "create", "update", "delete"]),
    ("depenses", &["view", "create", "update", "delete"]),
    ("caisse", &["view"]),
    ("cotisations", &["view", "create", "update", "delete"]),
    ("cultes", &["view", "create", "update", "delete"]),
    ("blog", &["view", "create", "update", "delete"]),
    ("photos", &["view", "create", "update", "delete"]),
    ("videos", &["view", "create", "update", "delete"]),
    ("users", &["view", "create", "update", "delete"]),
    ("roles", &["view"]),
    ("stats", &["view"]),
];

/// Liste plate du catalogue, dans l'ordre de déclaration.
pub fn all_permissions() -> Vec<String> {
    PERMISSION_CATALOG
        .iter()
        .flat_map(|(module, actions)| {
            actions.iter().map(move |a| format!("{module}.{a}"))
        })
        .collect()
}

// Raccourcis de déclaration pour la matrice ci-dessous.
const VIEW: &[&str] = &["view"];
const CRUD: &[&str] = &["view", "create", "update", "delete"];
const EDIT: &[&str] = &["view", "create", "update"];

fn perms(declaration: &[(&str, &[&str])]) -> BTreeSet<String> {
    declaration
        .iter()
        .flat_map(|(module, actions)| {
            actions.iter().map(move |a| format!("{module}.{a}"))
        })
        .collect()
}

lazy_static! {
    /// Matrice rôle → permissions. Instantané immuable chargé au démarrage ;
    /// la base est resynchronisée dessus par `RbacService::sync`.
    pub static ref ROLE_PERMISSIONS: HashMap<Role, BTreeSet<String>> = {
        let mut m = HashMap::new();

        // ADMIN détient l'intégralité du catalogue.
        m.insert(Role::Admin, all_permissions().into_iter().collect());

        m.insert(Role::Coordination, perms(&[
            ("dashboard", VIEW),
            ("enfants", &["view", "create", "update", "delete", "reclasser"]),
            ("moniteurs", CRUD),
            ("activites", CRUD),
            ("presences", CRUD),
            ("salles", CRUD),
            ("cultes", CRUD),
            ("paiements", VIEW),
            ("depenses", VIEW),
            ("caisse", VIEW),
            ("cotisations", VIEW),
            ("blog", EDIT),
            ("photos", EDIT),
            ("videos", EDIT),
            ("users", VIEW),
            ("roles", VIEW),
            ("stats", VIEW),
        ]));

        m.insert(Role::ChefSalle, perms(&[
            ("dashboard", VIEW),
            ("enfants", EDIT),
            ("moniteurs", VIEW),
            ("activites", EDIT),
            ("presences", EDIT),
            ("salles", VIEW),
            ("cultes", EDIT),
            ("blog", VIEW),
            ("photos", EDIT),
            ("videos", VIEW),
            ("stats", VIEW),
        ]));

        m.insert(Role::Moniteur, perms(&[
            ("dashboard", VIEW),
            ("enfants", VIEW),
            ("activites", VIEW),
            ("presences", &["view", "create"]),
            ("salles", VIEW),
            ("cultes", VIEW),
            ("blog", VIEW),
            ("photos", VIEW),
            ("videos", VIEW),
        ]));

        m.insert(Role::Financier, perms(&[
            ("dashboard", VIEW),
            ("paiements", CRUD),
            ("depenses", CRUD),
            ("cotisations", CRUD),
            ("caisse", VIEW),
            ("enfants", VIEW),
            ("moniteurs", VIEW),
            ("activites", VIEW),
            ("stats", VIEW),
        ]));

        m.insert(Role::Parent, perms(&[
            ("dashboard", VIEW),
            ("enfants", VIEW),
            ("activites", VIEW),
            ("blog", VIEW),
            ("photos", VIEW),
            ("videos", VIEW),
        ]));

        m.insert(Role::Enfant, perms(&[
            ("dashboard", VIEW),
            ("activites", VIEW),
            ("blog", VIEW),
            ("photos", VIEW),
            ("videos", VIEW),
        ]));

        m
    };
}

impl Role {
    /// Permissions déclarées pour ce rôle.
    pub fn permissions(&self) -> &'static BTreeSet<String> {
        &ROLE_PERMISSIONS[self]
    }

    pub fn can(&self, permission: &str) -> bool {
        self.permissions().contains(permission)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::Admin => "Administrateur — accès complet",
            Role::Coordination => "Coordination du ministère des enfants",
            Role::ChefSalle => "Responsable d'une salle",
            Role::Moniteur => "Moniteur / monitrice",
            Role::Financier => "Gestion des paiements, dépenses et cotisations",
            Role::Parent => "Parent — consultation",
            Role::Enfant => "Enfant — consultation",
        }
    }
}

// ── Lignes base de données ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleRow {
    pub id: Uuid,
    pub nom: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PermissionRow {
    pub id: Uuid,
    pub nom: String,
    pub module: String,
    pub created_at: DateTime<Utc>,
}

/// Réponse `GET /roles/{role}` : le rôle et sa liste de permissions.
#[derive(Debug, Serialize)]
pub struct RoleWithPermissions {
    pub nom: String,
    pub description: String,
    pub permissions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_detient_tout_le_catalogue() {
        let full: BTreeSet<String> = all_permissions().into_iter().collect();
        assert_eq!(Role::Admin.permissions(), &full);
    }

    #[test]
    fn catalogue_sans_doublons() {
        let flat = all_permissions();
        let uniq: BTreeSet<&String> = flat.iter().collect();
        assert_eq!(flat.len(), uniq.len());
    }

    #[test]
    fn matrice_couverte_par_le_catalogue() {
        // Aucune permission de la matrice ne doit sortir du catalogue déclaré.
        let catalog: BTreeSet<String> = all_permissions().into_iter().collect();
        for role in ALL_ROLES {
            for p in role.permissions() {
                assert!(catalog.contains(p), "{role} référence {p} hors catalogue");
            }
        }
    }

    #[test]
    fn financier_paie_mais_ne_supprime_pas_d_enfant() {
        assert!(Role::Financier.can("paiements.create"));
        assert!(Role::Financier.can("depenses.create"));
        assert!(!Role::Financier.can("enfants.delete"));
        assert!(!Role::Financier.can("users.create"));
    }

    #[test]
    fn moniteur_lecture_seule_sur_les_enfants() {
        assert!(Role::Moniteur.can("enfants.view"));
        assert!(!Role::Moniteur.can("enfants.update"));
        assert!(Role::Moniteur.can("presences.create"));
    }

    #[test]
    fn roundtrip_affichage_et_parsing() {
        for role in ALL_ROLES {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("INCONNU".parse::<Role>().is_err());
    }
}
