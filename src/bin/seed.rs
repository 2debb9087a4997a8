//! Seed de démonstration
//!
//! Remplit la base avec des données réalistes en français :
//! - Les 5 salles standard (Jardin, Ainés, Juniors, Cadets, Adolescents)
//! - La matrice rôles/permissions (resynchronisée)
//! - 7 comptes utilisateurs, un par rôle
//! - 10 moniteurs répartis dans les salles (responsable + adjoint par salle)
//! - 26 enfants couvrant toutes les tranches d'âge, salle calculée par le
//!   classificateur (dont un ado parti, un bébé non affecté, une date absente)
//! - Activités, participants, présences du dernier dimanche
//! - Types de cotisation, cotisations, paiements, dépenses, rapports de culte
//! - Une catégorie et un article de blog, une vidéo, 4 photos générées
//!
//! Usage:
//!   DATABASE_URL=... SEED_PASSWORD=Ecodim2026! DATA_DIR=/data/ecodim ./seed
//!
//! Variables d'environnement :
//!   DATABASE_URL   — chaîne de connexion PostgreSQL (obligatoire)
//!   SEED_PASSWORD  — mot de passe de tous les comptes (défaut : Ecodim2026!)
//!   DATA_DIR       — répertoire des fichiers uploadés (défaut : /data/ecodim)

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use image::{ImageFormat, Rgb, RgbImage};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;
use uuid::Uuid;

use ecodim_api::services::classification::{salle_pour_naissance, SalleCible, SALLES_STANDARD};
use ecodim_api::services::rbac::RbacService;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;
    let seed_password = env::var("SEED_PASSWORD").unwrap_or_else(|_| "Ecodim2026!".to_string());
    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "/data/ecodim".to_string());

    println!("=== Seed École du Dimanche ===");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    ecodim_api::db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    // 1. Purge des données existantes (tables métier uniquement)
    println!("Purge des données existantes...");
    sqlx::raw_sql(
        "TRUNCATE presences, activite_participants, activites, cotisations,
                  cotisation_types, paiements, depenses, cultes, blogs,
                  blog_categories, photos, videos, enfants, moniteurs, salles,
                  refresh_tokens, users
         RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await
    .context("Failed to truncate tables")?;

    // 2. Matrice rôles/permissions (idempotent)
    println!("Synchronisation rôles/permissions...");
    RbacService::sync(&pool).await?;

    // 3. Salles
    println!("Création des salles...");
    let mut salle_ids = std::collections::HashMap::new();
    for (&nom, capacite) in SALLES_STANDARD.iter().zip([30, 25, 25, 30, 40]) {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO salles (nom, capacite) VALUES ($1, $2) RETURNING id",
        )
        .bind(nom)
        .bind(capacite)
        .fetch_one(&pool)
        .await
        .with_context(|| format!("Failed to insert salle {nom}"))?;
        salle_ids.insert(nom.to_string(), id);
    }

    // 4. Utilisateurs (un par rôle)
    println!("Création des comptes utilisateurs...");
    let password_hash = bcrypt::hash(&seed_password, 10).context("Failed to hash password")?;
    let users = [
        ("admin@ecodim.local", "Essomba", "Pauline", "ADMIN"),
        ("coordination@ecodim.local", "Nganou", "Martin", "COORDINATION"),
        ("chef.salle@ecodim.local", "Abena", "Claire", "CHEF_SALLE"),
        ("moniteur@ecodim.local", "Tchoupo", "Serge", "MONITEUR"),
        ("financier@ecodim.local", "Mvondo", "Estelle", "FINANCIER"),
        ("parent@ecodim.local", "Onana", "Didier", "PARENT"),
        ("enfant@ecodim.local", "Onana", "Grace", "ENFANT"),
    ];
    let mut admin_id = Uuid::nil();
    for (email, nom, prenom, role) in users {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO users (email, password_hash, nom, prenom, role)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(email)
        .bind(&password_hash)
        .bind(nom)
        .bind(prenom)
        .bind(role)
        .fetch_one(&pool)
        .await
        .with_context(|| format!("Failed to insert user {email}"))?;
        if role == "ADMIN" {
            admin_id = id;
        }
    }

    // 5. Moniteurs : 2 par salle (responsable + adjoint)
    println!("Création des moniteurs...");
    let moniteurs = [
        ("Abena", "Claire", "F", "Jardin", "responsable"),
        ("Fouda", "Brigitte", "F", "Jardin", "adjoint"),
        ("Tchoupo", "Serge", "M", "Ainés", "responsable"),
        ("Ngo Bell", "Henriette", "F", "Ainés", "adjoint"),
        ("Eyenga", "Rosine", "F", "Juniors", "responsable"),
        ("Manga", "Paul", "M", "Juniors", "adjoint"),
        ("Biyick", "Samuel", "M", "Cadets", "responsable"),
        ("Ndongo", "Vanessa", "F", "Cadets", "adjoint"),
        ("Kamdem", "Eric", "M", "Adolescents", "responsable"),
        ("Sonfack", "Laure", "F", "Adolescents", "adjoint"),
    ];
    let mut moniteur_ids = Vec::new();
    for (nom, prenom, sexe, salle, fonction) in moniteurs {
        let salle_id = salle_ids[salle];
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO moniteurs
               (nom, prenom, sexe, fonction, salle_id, salle_nom, date_integration, telephone)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
        )
        .bind(nom)
        .bind(prenom)
        .bind(sexe)
        .bind(fonction)
        .bind(salle_id)
        .bind(salle)
        .bind(Utc::now().date_naive() - Duration::days(700))
        .bind("+237650000000")
        .fetch_one(&pool)
        .await
        .with_context(|| format!("Failed to insert moniteur {nom}"))?;

        let colonne = if fonction == "responsable" { "responsable_id" } else { "adjoint_id" };
        sqlx::query(&format!("UPDATE salles SET {colonne} = $1 WHERE id = $2"))
            .bind(id)
            .bind(salle_id)
            .execute(&pool)
            .await?;
        moniteur_ids.push(id);
    }

    // 6. Enfants : toutes les tranches, salle calculée par le classificateur
    println!("Création des enfants...");
    let today = Utc::now().date_naive();
    let noms = [
        "Atangana", "Bekono", "Djoumessi", "Ekani", "Fotso", "Kouam", "Mballa",
        "Ngono", "Owona", "Simo", "Tsafack", "Zambo",
    ];
    let prenoms = [
        "Aaron", "Bénédicte", "Chanel", "Daniel", "Esther", "Franck", "Gaëlle",
        "Hervé", "Ivana", "Josué", "Keza", "Lionel",
    ];
    // Âges de 1 à 20 ans + deux cas particuliers plus bas
    let mut enfant_ids = Vec::new();
    for (i, age) in (1..=20).enumerate() {
        let naissance = naissance_il_y_a(today, age);
        let (salle_id, salle_nom) = match salle_pour_naissance(Some(naissance), today) {
            SalleCible::Salle(nom) => (salle_ids.get(nom).copied(), Some(nom.to_string())),
            SalleCible::AdoParti => (None, Some("ADO PARTI".to_string())),
            SalleCible::NonAffectee | SalleCible::Inchangee => (None, None),
        };
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO enfants
               (nom, prenom, sexe, date_naissance, salle_id, salle_nom,
                quartier, baptise, telephone_parent)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
        )
        .bind(noms[i % noms.len()])
        .bind(prenoms[(i + 3) % prenoms.len()])
        .bind(if i % 2 == 0 { "M" } else { "F" })
        .bind(naissance)
        .bind(salle_id)
        .bind(salle_nom)
        .bind("Nkoldongo")
        .bind(age >= 12)
        .bind("+237690000000")
        .fetch_one(&pool)
        .await?;
        enfant_ids.push(id);
    }

    // Six enfants supplémentaires dans les tranches pleines, plus un sans
    // date de naissance (salle inchangée : aucune)
    for age in [4, 6, 8, 11, 15, 16] {
        let naissance = naissance_il_y_a(today, age);
        let (salle_id, salle_nom) = match salle_pour_naissance(Some(naissance), today) {
            SalleCible::Salle(nom) => (salle_ids.get(nom).copied(), Some(nom.to_string())),
            _ => (None, None),
        };
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO enfants (nom, prenom, sexe, date_naissance, salle_id, salle_nom, quartier)
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(noms[(age as usize) % noms.len()])
        .bind(prenoms[(age as usize) % prenoms.len()])
        .bind(if age % 2 == 0 { "F" } else { "M" })
        .bind(naissance)
        .bind(salle_id)
        .bind(salle_nom)
        .bind("Mvog-Ada")
        .fetch_one(&pool)
        .await?;
        enfant_ids.push(id);
    }
    sqlx::query(
        "INSERT INTO enfants (nom, prenom, sexe, quartier)
         VALUES ('Essono', 'Marthe', 'F', 'Etoudi')",
    )
    .execute(&pool)
    .await?;

    // 7. Activités et participants
    println!("Création des activités...");
    let sortie_id: Uuid = sqlx::query_scalar(
        "INSERT INTO activites (titre, description, type_activite, date_debut, lieu, cout, statut)
         VALUES ('Sortie au Mont Fébé', 'Randonnée et pique-nique des Cadets',
                 'sortie', $1, 'Mont Fébé', 150000, 'prevue')
         RETURNING id",
    )
    .bind(today + Duration::days(21))
    .fetch_one(&pool)
    .await?;

    sqlx::query(
        "INSERT INTO activites (titre, type_activite, date_debut, date_fin, lieu, cout, statut)
         VALUES ('Camp biblique des vacances', 'camp', $1, $2, 'Mbalmayo', 800000, 'terminee')",
    )
    .bind(today - Duration::days(45))
    .bind(today - Duration::days(40))
    .execute(&pool)
    .await?;

    for enfant_id in enfant_ids.iter().skip(9).take(4) {
        let nom: String =
            sqlx::query_scalar("SELECT nom || ' ' || prenom FROM enfants WHERE id = $1")
                .bind(enfant_id)
                .fetch_one(&pool)
                .await?;
        sqlx::query(
            "INSERT INTO activite_participants (activite_id, personne_type, personne_id, personne_nom)
             VALUES ($1, 'enfant', $2, $3)",
        )
        .bind(sortie_id)
        .bind(enfant_id)
        .bind(nom)
        .execute(&pool)
        .await?;
    }
    let accompagnateur: String =
        sqlx::query_scalar("SELECT nom || ' ' || prenom FROM moniteurs WHERE id = $1")
            .bind(moniteur_ids[6])
            .fetch_one(&pool)
            .await?;
    sqlx::query(
        "INSERT INTO activite_participants (activite_id, personne_type, personne_id, personne_nom)
         VALUES ($1, 'moniteur', $2, $3)",
    )
    .bind(sortie_id)
    .bind(moniteur_ids[6])
    .bind(accompagnateur)
    .execute(&pool)
    .await?;

    // 8. Présences du dernier dimanche
    println!("Création des présences...");
    let dernier_dimanche = dernier_jour(today, Weekday::Sun);
    for (i, enfant_id) in enfant_ids.iter().take(12).enumerate() {
        let nom: String =
            sqlx::query_scalar("SELECT nom || ' ' || prenom FROM enfants WHERE id = $1")
                .bind(enfant_id)
                .fetch_one(&pool)
                .await?;
        let statut = match i % 5 {
            0 => "absent",
            1 => "excuse",
            _ => "present",
        };
        sqlx::query(
            "INSERT INTO presences (date_presence, personne_type, personne_id, personne_nom, statut)
             VALUES ($1, 'enfant', $2, $3, $4)",
        )
        .bind(dernier_dimanche)
        .bind(enfant_id)
        .bind(nom)
        .bind(statut)
        .execute(&pool)
        .await?;
    }

    // 9. Finances
    println!("Création des données financières...");
    let type_mensuelle: Uuid = sqlx::query_scalar(
        "INSERT INTO cotisation_types (nom, montant_standard, periodicite)
         VALUES ('Cotisation moniteurs', 2000, 'mensuelle') RETURNING id",
    )
    .fetch_one(&pool)
    .await?;
    sqlx::query(
        "INSERT INTO cotisation_types (nom, montant_standard, periodicite)
         VALUES ('Caisse de solidarité', 5000, 'trimestrielle')",
    )
    .execute(&pool)
    .await?;

    let periode = format!("{}-{:02}", today.year(), today.month());
    for moniteur_id in moniteur_ids.iter().take(6) {
        let nom: String =
            sqlx::query_scalar("SELECT nom || ' ' || prenom FROM moniteurs WHERE id = $1")
                .bind(moniteur_id)
                .fetch_one(&pool)
                .await?;
        sqlx::query(
            "INSERT INTO cotisations
               (cotisation_type_id, type_nom, moniteur_id, moniteur_nom,
                montant, periode, date_versement)
             VALUES ($1, 'Cotisation moniteurs', $2, $3, 2000, $4, $5)",
        )
        .bind(type_mensuelle)
        .bind(moniteur_id)
        .bind(nom)
        .bind(&periode)
        .bind(dernier_dimanche)
        .execute(&pool)
        .await?;
    }

    sqlx::query(
        "INSERT INTO paiements (libelle, montant, date_paiement, mode, activite_id)
         VALUES ('Inscription sortie Mont Fébé', 10000, $1, 'mobile_money', $2)",
    )
    .bind(today - Duration::days(3))
    .bind(sortie_id)
    .execute(&pool)
    .await?;

    sqlx::query(
        "INSERT INTO depenses (libelle, montant, date_depense, categorie, beneficiaire)
         VALUES ('Achat de matériel pédagogique', 45000, $1, 'materiel', 'Librairie Saint-Paul')",
    )
    .bind(today - Duration::days(10))
    .execute(&pool)
    .await?;

    // 10. Rapports de culte des 4 derniers dimanches
    println!("Création des rapports de culte...");
    for semaine in 0..4 {
        let date_culte = dernier_dimanche - Duration::weeks(semaine);
        sqlx::query(
            "INSERT INTO cultes
               (date_culte, theme, orateur, nb_enfants, nb_moniteurs, nb_visiteurs, offrande)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(date_culte)
        .bind(format!("La foi en action ({})", 4 - semaine))
        .bind("Fr. Kamdem")
        .bind(60 + semaine as i32 * 3)
        .bind(9)
        .bind(semaine as i32)
        .bind(25000 + semaine * 1500)
        .execute(&pool)
        .await?;
    }

    // 11. Contenus
    println!("Création des contenus...");
    let categorie_id: Uuid = sqlx::query_scalar(
        "INSERT INTO blog_categories (nom) VALUES ('Annonces') RETURNING id",
    )
    .fetch_one(&pool)
    .await?;
    sqlx::query(
        "INSERT INTO blogs
           (titre, contenu, categorie_id, categorie_nom, auteur_id, auteur_nom,
            publie, date_publication)
         VALUES ('Rentrée de l''École du Dimanche',
                 'La rentrée aura lieu le premier dimanche de septembre. Toutes les salles accueilleront les enfants dès 9h.',
                 $1, 'Annonces', $2, 'Pauline Essomba', TRUE, $3)",
    )
    .bind(categorie_id)
    .bind(admin_id)
    .bind(today)
    .execute(&pool)
    .await?;

    sqlx::query(
        "INSERT INTO videos (titre, url, description)
         VALUES ('Chorale des Adolescents — fête de fin d''année',
                 'https://www.youtube.com/watch?v=dQw4w9WgXcQ',
                 'Prestation de la chorale lors de la fête de clôture')",
    )
    .execute(&pool)
    .await?;

    // 12. Photos de démonstration (JPEG générés)
    println!("Génération des photos de démonstration...");
    let photo_dir = std::path::Path::new(&data_dir).join("photos");
    std::fs::create_dir_all(&photo_dir).context("Failed to create photo dir")?;
    let couleurs = [
        ([66u8, 135, 245], "Sortie Mont Fébé — le départ"),
        ([240, 180, 60], "Camp biblique — veillée"),
        ([90, 200, 120], "Salle Jardin en activité"),
        ([200, 80, 140], "Chorale des Cadets"),
    ];
    for (rgb, titre) in couleurs {
        let stored_name = format!("{}.jpg", Uuid::new_v4());
        let img = RgbImage::from_pixel(640, 480, Rgb(rgb));
        img.save_with_format(photo_dir.join(&stored_name), ImageFormat::Jpeg)
            .context("Failed to write demo photo")?;
        sqlx::query(
            "INSERT INTO photos (titre, fichier_url, uploaded_by)
             VALUES ($1, $2, $3)",
        )
        .bind(titre)
        .bind(format!("/files/photos/{stored_name}"))
        .bind(admin_id)
        .execute(&pool)
        .await?;
    }

    imprimer_recapitulatif(&pool).await?;
    println!("=== Seed terminé ===");
    println!("Comptes : admin@ecodim.local ... enfant@ecodim.local / {seed_password}");
    Ok(())
}

/// Date de naissance donnant exactement `ans` ans révolus (l'anniversaire est
/// passé depuis ~45 jours, loin des bords de tranche).
fn naissance_il_y_a(today: NaiveDate, ans: i32) -> NaiveDate {
    let repere = today - Duration::days(45);
    NaiveDate::from_ymd_opt(repere.year() - ans, repere.month(), repere.day())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(repere.year() - ans, repere.month(), 28).unwrap())
}

fn dernier_jour(depuis: NaiveDate, jour: Weekday) -> NaiveDate {
    let mut d = depuis;
    while d.weekday() != jour {
        d -= Duration::days(1);
    }
    d
}

async fn imprimer_recapitulatif(pool: &PgPool) -> Result<()> {
    let par_salle: Vec<(String, i64)> = sqlx::query_as(
        "SELECT COALESCE(salle_nom, 'Non affectés'), COUNT(*)
         FROM enfants GROUP BY salle_nom ORDER BY 1",
    )
    .fetch_all(pool)
    .await?;
    println!("Répartition des enfants :");
    for (salle, n) in par_salle {
        println!("  {salle:<14} {n}");
    }
    Ok(())
}
