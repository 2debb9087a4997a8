use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// Fenêtres appliquées au login (par email et par IP serait excessif ici :
/// l'application est interne au ministère).
pub const LOGIN_MAX_ATTEMPTS: u64 = 5;
pub const LOGIN_WINDOW_SECS: u64 = 300;

/// Compteur glissant INCR + EXPIRE dans Redis. Le TTL n'est posé qu'au
/// premier incrément pour ne pas remettre la fenêtre à zéro à chaque essai.
pub async fn check_rate_limit(
    redis: &mut redis::aio::MultiplexedConnection,
    key: &str,
    max_attempts: u64,
    window_secs: u64,
) -> Result<(), (StatusCode, Json<Value>)> {
    let count: u64 = redis::cmd("INCR")
        .arg(key)
        .query_async(redis)
        .await
        .unwrap_or(0);

    if count == 1 {
        let _: Result<(), _> = redis::cmd("EXPIRE")
            .arg(key)
            .arg(window_secs)
            .query_async(redis)
            .await;
    }

    if count > max_attempts {
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Trop de tentatives. Réessayez dans quelques minutes." })),
        ));
    }

    Ok(())
}
