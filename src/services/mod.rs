pub mod activites;
pub mod auth;
pub mod blogs;
pub mod classification;
pub mod cotisations;
pub mod cultes;
pub mod depenses;
pub mod enfants;
pub mod metrics;
pub mod moniteurs;
pub mod paiements;
pub mod photos;
pub mod presences;
pub mod rbac;
pub mod salles;
pub mod settings;
pub mod stats;
pub mod users;
pub mod videos;
