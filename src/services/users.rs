use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{CreateUserRequest, UpdateUserRequest, User, UserProfile};

pub struct UserService;

impl UserService {
    pub async fn list(pool: &PgPool) -> anyhow::Result<Vec<UserProfile>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE is_active = TRUE ORDER BY nom, prenom",
        )
        .fetch_all(pool)
        .await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<UserProfile>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user.map(UserProfile::from))
    }

    pub async fn create(pool: &PgPool, req: &CreateUserRequest) -> anyhow::Result<UserProfile> {
        if !req.email.contains('@') {
            anyhow::bail!("Adresse email invalide");
        }
        if req.password.len() < 8 {
            anyhow::bail!("Le mot de passe doit contenir au moins 8 caractères");
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&req.email)
                .fetch_one(pool)
                .await?;
        if exists {
            anyhow::bail!("Un compte existe déjà avec cet email");
        }

        let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)?;
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, nom, prenom, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(&req.email)
        .bind(password_hash)
        .bind(&req.nom)
        .bind(&req.prenom)
        .bind(req.role.to_string())
        .fetch_one(pool)
        .await?;
        Ok(user.into())
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateUserRequest,
    ) -> anyhow::Result<UserProfile> {
        if let Some(email) = req.email.as_deref() {
            if !email.contains('@') {
                anyhow::bail!("Adresse email invalide");
            }
        }

        let user = sqlx::query_as::<_, User>(
            "UPDATE users
             SET email     = COALESCE($1, email),
                 nom       = COALESCE($2, nom),
                 prenom    = COALESCE($3, prenom),
                 role      = COALESCE($4, role),
                 is_active = COALESCE($5, is_active)
             WHERE id = $6
             RETURNING *",
        )
        .bind(&req.email)
        .bind(&req.nom)
        .bind(&req.prenom)
        .bind(req.role.map(|r| r.to_string()))
        .bind(req.is_active)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(user.into())
    }

    /// Désactivation — les jetons de rafraîchissement du compte tombent avec.
    pub async fn deactivate(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Réinitialisation par un admin : mot de passe temporaire communiqué
    /// hors-bande (pas d'email dans cette application).
    pub async fn reset_password(pool: &PgPool, id: Uuid) -> anyhow::Result<String> {
        let temp_password: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();

        let hash = bcrypt::hash(&temp_password, bcrypt::DEFAULT_COST)?;
        let updated = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(hash)
            .bind(id)
            .execute(pool)
            .await?;
        if updated.rows_affected() == 0 {
            anyhow::bail!("Utilisateur introuvable");
        }

        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(temp_password)
    }
}
