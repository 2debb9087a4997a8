use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecodim_api::{config::Config, db, middleware::auth::JwtSecret, routes, services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let config = Arc::new(config);

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    services::rbac::RbacService::sync(&pool).await?;
    info!("Database connected, migrations applied, RBAC synchronized");

    let redis_client = redis::Client::open(config.redis_url.as_str())?;
    let redis_conn = redis_client.get_multiplexed_async_connection().await?;
    info!("Redis connected");

    services::metrics::start(pool.clone());

    let state = AppState {
        db: pool,
        redis: redis_conn,
        config: config.clone(),
    };

    // CORS : le dashboard configuré + localhost pour le développement.
    let base_url = config.app_base_url.clone();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let o = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") || o == base_url
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_origin(cors_origin);

    let jwt_secret = JwtSecret(config.jwt_secret.clone());

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        // Auth
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/refresh", post(routes::auth::refresh_token))
        .route("/auth/logout", post(routes::auth::logout))
        .route("/auth/me", get(routes::auth::me))
        .route("/auth/permissions", get(routes::auth::my_permissions))
        .route("/auth/change-password", post(routes::auth::change_password))
        // Enfants
        .route("/enfants", get(routes::enfants::list_enfants).post(routes::enfants::create_enfant))
        .route("/enfants/reclasser", post(routes::enfants::reclasser))
        .route("/enfants/{id}", get(routes::enfants::get_enfant).put(routes::enfants::update_enfant).delete(routes::enfants::delete_enfant))
        .route("/enfants-statistics", get(routes::stats::enfants_statistics))
        // Moniteurs
        .route("/moniteurs", get(routes::moniteurs::list_moniteurs).post(routes::moniteurs::create_moniteur))
        .route("/moniteurs/{id}", get(routes::moniteurs::get_moniteur).put(routes::moniteurs::update_moniteur).delete(routes::moniteurs::delete_moniteur))
        .route("/moniteurs-statistics", get(routes::stats::moniteurs_statistics))
        // Salles
        .route("/salles", get(routes::salles::list_salles).post(routes::salles::create_salle))
        .route("/salles/{id}", get(routes::salles::get_salle).put(routes::salles::update_salle).delete(routes::salles::delete_salle))
        .route("/salles-effectifs", get(routes::salles::effectifs))
        // Activités et participants
        .route("/activites", get(routes::activites::list_activites).post(routes::activites::create_activite))
        .route("/activites/{id}", get(routes::activites::get_activite).put(routes::activites::update_activite).delete(routes::activites::delete_activite))
        .route("/activites/{id}/participants", get(routes::activites::list_participants).post(routes::activites::add_participant))
        .route("/activites/{id}/participants/{type}/{participant_id}", delete(routes::activites::remove_participant))
        .route("/activites-statistics", get(routes::stats::activites_statistics))
        // Présences
        .route("/presences", get(routes::presences::list_presences).post(routes::presences::create_presence))
        .route("/presences/{id}", get(routes::presences::get_presence).put(routes::presences::update_presence).delete(routes::presences::delete_presence))
        .route("/presences-statistics", get(routes::stats::presences_statistics))
        // Paiements
        .route("/paiements", get(routes::paiements::list_paiements).post(routes::paiements::create_paiement))
        .route("/paiements/{id}", get(routes::paiements::get_paiement).put(routes::paiements::update_paiement).delete(routes::paiements::delete_paiement))
        .route("/paiements-statistics", get(routes::stats::paiements_statistics))
        // Dépenses
        .route("/depenses", get(routes::depenses::list_depenses).post(routes::depenses::create_depense))
        .route("/depenses/{id}", get(routes::depenses::get_depense).put(routes::depenses::update_depense).delete(routes::depenses::delete_depense))
        .route("/depenses-statistics", get(routes::stats::depenses_statistics))
        // Cotisations
        .route("/cotisation-types", get(routes::cotisations::list_types).post(routes::cotisations::create_type))
        .route("/cotisation-types/{id}", put(routes::cotisations::update_type).delete(routes::cotisations::delete_type))
        .route("/cotisations", get(routes::cotisations::list_cotisations).post(routes::cotisations::create_cotisation))
        .route("/cotisations/{id}", get(routes::cotisations::get_cotisation).put(routes::cotisations::update_cotisation).delete(routes::cotisations::delete_cotisation))
        .route("/cotisations-statistics", get(routes::stats::cotisations_statistics))
        // Cultes
        .route("/cultes", get(routes::cultes::list_cultes).post(routes::cultes::create_culte))
        .route("/cultes/{id}", get(routes::cultes::get_culte).put(routes::cultes::update_culte).delete(routes::cultes::delete_culte))
        .route("/cultes-statistics", get(routes::stats::cultes_statistics))
        // Blog
        .route("/blog-categories", get(routes::blogs::list_categories).post(routes::blogs::create_categorie))
        .route("/blog-categories/{id}", put(routes::blogs::rename_categorie).delete(routes::blogs::delete_categorie))
        .route("/blogs", get(routes::blogs::list_blogs).post(routes::blogs::create_blog))
        .route("/blogs/{id}", get(routes::blogs::get_blog).put(routes::blogs::update_blog).delete(routes::blogs::delete_blog))
        // Photos et vidéos
        .route("/photos", get(routes::photos::list_photos).post(routes::photos::upload_photo))
        .route("/photos/{id}", get(routes::photos::get_photo).put(routes::photos::update_photo).delete(routes::photos::delete_photo))
        .route("/videos", get(routes::videos::list_videos).post(routes::videos::create_video))
        .route("/videos/{id}", get(routes::videos::get_video).put(routes::videos::update_video).delete(routes::videos::delete_video))
        // Utilisateurs et rôles
        .route("/users", get(routes::users::list_users).post(routes::users::create_user))
        .route("/users/{id}", get(routes::users::get_user).put(routes::users::update_user).delete(routes::users::deactivate_user))
        .route("/users/{id}/reset-password", post(routes::users::reset_user_password))
        .route("/roles", get(routes::roles::list_roles))
        .route("/roles/{nom}", get(routes::roles::get_role))
        .route("/permissions", get(routes::roles::list_permissions))
        // Paramètres et fichiers
        .route("/settings", get(routes::settings::get_settings))
        .route("/public-settings", get(routes::settings::get_public_settings))
        .route("/settings/update", put(routes::settings::update_settings))
        .route("/settings/upload", post(routes::settings::upload_settings_images))
        .route("/files/{*path}", get(routes::files::serve_file))
        // Statistiques transverses
        .route("/caisse-statistics", get(routes::stats::caisse_statistics))
        .route("/dashboard-statistics", get(routes::stats::dashboard_statistics))
        .layer(axum::Extension(jwt_secret))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Uploads de photos : 20 MB suffisent largement
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("ecodim API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
