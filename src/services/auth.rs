use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    auth::{Claims, RefreshClaims},
    role::Role,
    user::{LoginResponse, RefreshToken, User},
};

pub struct AuthService;

impl AuthService {
    pub async fn login(
        pool: &PgPool,
        email: &str,
        password: &str,
        jwt_secret: &str,
        refresh_secret: &str,
        access_ttl: u64,
        refresh_ttl_days: u64,
    ) -> anyhow::Result<LoginResponse> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND is_active = TRUE",
        )
        .bind(email)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Identifiants invalides"))?;

        let valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|_| anyhow::anyhow!("Identifiants invalides"))?;
        if !valid {
            anyhow::bail!("Identifiants invalides");
        }

        let role: Role = user.role.parse()?;
        let access_token = Self::generate_access_token(&user, role, jwt_secret, access_ttl)?;
        let refresh_token =
            Self::issue_refresh_token(pool, user.id, refresh_secret, refresh_ttl_days).await?;

        Ok(LoginResponse {
            access_token,
            refresh_token,
            user: user.into(),
        })
    }

    /// Validate a refresh token, rotate it, and return a fresh token pair.
    pub async fn refresh(
        pool: &PgPool,
        refresh_token_str: &str,
        jwt_secret: &str,
        refresh_secret: &str,
        access_ttl: u64,
        refresh_ttl_days: u64,
    ) -> anyhow::Result<LoginResponse> {
        use jsonwebtoken::{decode, DecodingKey, Validation};

        let key = DecodingKey::from_secret(refresh_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let claims = decode::<RefreshClaims>(refresh_token_str, &key, &validation)?.claims;

        let token_id: Uuid = claims.jti.parse()?;
        let stored = sqlx::query_as::<_, RefreshToken>(
            "SELECT * FROM refresh_tokens WHERE id = $1 AND revoked = FALSE",
        )
        .bind(token_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Session expirée, reconnectez-vous"))?;

        if stored.expires_at < Utc::now() {
            anyhow::bail!("Session expirée, reconnectez-vous");
        }
        if !bcrypt::verify(refresh_token_str, &stored.token_hash)? {
            anyhow::bail!("Session expirée, reconnectez-vous");
        }

        // Rotation : l'ancien jeton est révoqué avant d'en émettre un nouveau.
        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = $1")
            .bind(token_id)
            .execute(pool)
            .await?;

        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1 AND is_active = TRUE",
        )
        .bind(stored.user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Compte désactivé"))?;

        let role: Role = user.role.parse()?;
        let access_token = Self::generate_access_token(&user, role, jwt_secret, access_ttl)?;
        let refresh_token =
            Self::issue_refresh_token(pool, user.id, refresh_secret, refresh_ttl_days).await?;

        Ok(LoginResponse {
            access_token,
            refresh_token,
            user: user.into(),
        })
    }

    /// Revoke every active refresh token of the user.
    pub async fn logout(pool: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn change_password(
        pool: &PgPool,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> anyhow::Result<()> {
        if new_password.len() < 8 {
            anyhow::bail!("Le mot de passe doit contenir au moins 8 caractères");
        }

        let hash: String =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        if !bcrypt::verify(current_password, &hash)? {
            anyhow::bail!("Mot de passe actuel incorrect");
        }

        let new_hash = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)?;
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(new_hash)
            .bind(user_id)
            .execute(pool)
            .await?;

        // Les sessions ouvertes avec l'ancien mot de passe tombent.
        Self::logout(pool, user_id).await
    }

    pub fn generate_access_token(
        user: &User,
        role: Role,
        secret: &str,
        ttl_seconds: u64,
    ) -> anyhow::Result<String> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: user.id.to_string(),
            role,
            iat: now,
            exp: now + ttl_seconds as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;
        Ok(token)
    }

    /// Generate, persist (bcrypt hash) and return a refresh token.
    async fn issue_refresh_token(
        pool: &PgPool,
        user_id: Uuid,
        refresh_secret: &str,
        ttl_days: u64,
    ) -> anyhow::Result<String> {
        let token_id = Uuid::new_v4();
        let now = Utc::now().timestamp() as usize;
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            jti: token_id.to_string(),
            iat: now,
            exp: now + (ttl_days * 86400) as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(refresh_secret.as_bytes()),
        )?;

        let hash = bcrypt::hash(&token, 8)?;
        let expires_at = Utc::now() + chrono::Duration::days(ttl_days as i64);
        sqlx::query(
            "INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(token_id)
        .bind(user_id)
        .bind(hash)
        .bind(expires_at)
        .execute(pool)
        .await?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::decode_access_token;
    use chrono::Utc;

    fn user_fixture(role: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: "test@ecodim.local".into(),
            password_hash: String::new(),
            nom: "Mbarga".into(),
            prenom: "Alice".into(),
            role: role.into(),
            avatar_url: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn jeton_acces_aller_retour() {
        let user = user_fixture("FINANCIER");
        let token =
            AuthService::generate_access_token(&user, Role::Financier, "secret-test", 900).unwrap();

        let decoded = decode_access_token(&token, "secret-test").unwrap();
        assert_eq!(decoded.user_id, user.id);
        assert_eq!(decoded.role, Role::Financier);
    }

    #[test]
    fn jeton_signe_avec_un_autre_secret_rejete() {
        let user = user_fixture("ADMIN");
        let token =
            AuthService::generate_access_token(&user, Role::Admin, "secret-a", 900).unwrap();
        assert!(decode_access_token(&token, "secret-b").is_err());
    }
}
