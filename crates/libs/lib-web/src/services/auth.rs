//! # Auth Service
//!
//! Credential verification, registration, and session token issuance.
//!
//! Unknown emails and wrong passwords both end in
//! [`AppError::InvalidCredentials`], so callers cannot tell which occurred.

use lib_auth::{encode_jwt, hash_password, verify_password};
use lib_core::model::store::{User, UserForCreate, UserRepository};
use lib_core::{AppError, Config, DbPool, Result};
use tracing::{debug, info, instrument, warn};

pub const USER_NOT_FOUND: &str = "User Not Found";
pub const USER_EXISTS: &str = "User already exists";

pub struct AuthService {
    pool: DbPool,
    config: Config,
}

impl AuthService {
    pub fn new(pool: DbPool, config: Config) -> Self {
        Self { pool, config }
    }

    /// Check `email`/`password` against the store and issue a token.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String> {
        let Some(user) = UserRepository::find_by_email(&self.pool, email).await? else {
            warn!("[LOGIN] Unknown email");
            return Err(AppError::InvalidCredentials);
        };

        debug!("[LOGIN] Verifying password...");
        if !check_password(password, &user.password_hash).await? {
            warn!("[LOGIN] Wrong password for user {}", user.id);
            return Err(AppError::InvalidCredentials);
        }

        info!("[LOGIN] User {} authenticated", user.id);
        self.issue_token(&user.id)
    }

    /// Create an account and issue a token for it.
    #[instrument(skip_all, fields(email = %new_user.email))]
    pub async fn register(&self, new_user: UserForCreate, password: &str) -> Result<String> {
        if UserRepository::find_by_email(&self.pool, &new_user.email).await?.is_some() {
            warn!("[REGISTER] Email already registered");
            return Err(AppError::Conflict(USER_EXISTS.to_string()));
        }

        debug!("[REGISTER] Hashing password...");
        let password_hash = make_hash(password).await?;

        let user = UserRepository::create(
            &self.pool,
            UserForCreate {
                password_hash,
                ..new_user
            },
        )
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent registration of the same email
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(USER_EXISTS.to_string())
            }
            other => AppError::from(other),
        })?;

        info!("[REGISTER] User {} created", user.id);
        self.issue_token(&user.id)
    }

    /// The user a verified token refers to.
    pub async fn current_user(&self, user_id: &str) -> Result<User> {
        UserRepository::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| {
                warn!("[AUTH] Token refers to missing user {}", user_id);
                AppError::NotFound(USER_NOT_FOUND.to_string())
            })
    }

    /// Sign a session token for `user_id` with the configured lifetime.
    pub fn issue_token(&self, user_id: &str) -> Result<String> {
        encode_jwt(user_id, &self.config.jwt_secret, self.config.token_ttl_secs)
            .map_err(|e| AppError::Internal(e.to_string()))
    }
}

// Argon2 is CPU-bound; keep it off the async workers.
async fn make_hash(password: &str) -> Result<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(e.to_string()))
}

async fn check_password(password: &str, hash: &str) -> Result<bool> {
    let (password, hash) = (password.to_string(), hash.to_string());
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{seed_user, setup_test_db, test_config};
    use lib_auth::decode_jwt;

    #[tokio::test]
    async fn test_authenticate_returns_token_for_user() {
        let pool = setup_test_db().await;
        let user = seed_user(&pool, "Alice", "alice@example.com", "secret1").await;
        let service = AuthService::new(pool, test_config());

        let token = service.authenticate("alice@example.com", "secret1").await.unwrap();
        let claims = decode_jwt(&token, &test_config().jwt_secret).unwrap();

        assert_eq!(claims.user_id(), user.id);
        assert_eq!(claims.exp - claims.iat, 36_000);
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
        let pool = setup_test_db().await;
        seed_user(&pool, "Alice", "alice@example.com", "secret1").await;
        let service = AuthService::new(pool, test_config());

        let unknown = service.authenticate("bob@example.com", "secret1").await;
        let wrong = service.authenticate("alice@example.com", "wrong").await;

        assert!(matches!(unknown, Err(AppError::InvalidCredentials)));
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let pool = setup_test_db().await;
        seed_user(&pool, "Alice", "alice@example.com", "secret1").await;
        let service = AuthService::new(pool, test_config());

        let result = service
            .register(
                UserForCreate::new("Other".into(), "alice@example.com".into(), String::new()),
                "another1",
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(msg)) if msg == USER_EXISTS));
    }

    #[tokio::test]
    async fn test_current_user_missing() {
        let pool = setup_test_db().await;
        let service = AuthService::new(pool, test_config());

        let result = service.current_user("0b7e7dbe-6f53-4d0e-9d0a-3a3c51a0b1f2").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
