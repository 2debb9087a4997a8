/// Reclassement par âge de tous les enfants actifs.
/// À lancer périodiquement (ex: cron à la rentrée : 0 6 1 9 * /app/reclassify-salles)
///
/// Usage: reclassify-salles [--date AAAA-MM-JJ]
///   --date : date de référence pour le calcul des âges (défaut : aujourd'hui)

use chrono::{NaiveDate, Utc};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;

use ecodim_api::services::enfants::EnfantService;

#[derive(Parser)]
#[command(name = "reclassify-salles", about = "Reclasse les enfants par tranche d'âge")]
struct Args {
    /// Date de référence (AAAA-MM-JJ), aujourd'hui si absente
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let reference = args.date.unwrap_or_else(|| Utc::now().date_naive());

    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL environment variable not set");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Reclassement au {}", reference);

    let resume = EnfantService::reclasser_tous(&pool, reference).await?;

    println!("Enfants examinés   : {}", resume.examines);
    println!("Réaffectés         : {}", resume.reaffectes);
    println!("Ados partis (>18)  : {}", resume.ados_partis);
    println!("Non affectés (<3)  : {}", resume.non_affectes);
    println!("Inchangés          : {}", resume.inchanges);
    if !resume.salles_manquantes.is_empty() {
        println!("Salles manquantes  : {}", resume.salles_manquantes.join(", "));
    }

    Ok(())
}
