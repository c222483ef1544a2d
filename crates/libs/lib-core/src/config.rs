//! # Application Configuration
//!
//! Configuration is loaded from environment variables once at startup,
//! validated, and then handed to the server as a plain value. Handlers
//! receive it through axum state; there is no global instance.
//!
//! ```rust,no_run
//! use lib_core::Config;
//!
//! let config = Config::from_env()?.validated()?;
//! println!("listening on {}", config.bind_address());
//! # Ok::<(), lib_core::AppError>(())
//! ```

use crate::error::{AppError, Result};
use lib_utils::{get_env, get_env_or, get_env_parse_or};

/// Default session token lifetime (10 hours).
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 36_000;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for session token signing and verification
    ///
    /// **Must be at least 32 characters long**.
    pub jwt_secret: String,

    /// Session token lifetime in seconds
    ///
    /// Valid range: 60 seconds to 30 days.
    pub token_ttl_secs: i64,

    /// Interface to bind the HTTP listener to
    pub host: String,

    /// Port to bind the HTTP listener to
    pub port: u16,

    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `DATABASE_URL` | `sqlite:data/postboard.db` |
    /// | `JWT_SECRET` | required |
    /// | `TOKEN_TTL_SECS` | `36000` |
    /// | `HOST` | `0.0.0.0` |
    /// | `PORT` | `5000` |
    /// | `CORS_ORIGINS` | empty (any origin) |
    pub fn from_env() -> Result<Self> {
        let database_url = get_env_or("DATABASE_URL", "sqlite:data/postboard.db");

        let jwt_secret = get_env("JWT_SECRET").map_err(|e| AppError::Config(e.to_string()))?;

        let token_ttl_secs = get_env_parse_or("TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)
            .map_err(|e| AppError::Config(e.to_string()))?;

        let host = get_env_or("HOST", "0.0.0.0");

        let port = get_env_parse_or("PORT", 5000u16)
            .map_err(|e| AppError::Config(e.to_string()))?;

        let cors_origins = parse_origins(&get_env_or("CORS_ORIGINS", ""));

        Ok(Self {
            database_url,
            jwt_secret,
            token_ttl_secs,
            host,
            port,
            cors_origins,
        })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < 32 {
            return Err(AppError::Config(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }

        if !(60..=2_592_000).contains(&self.token_ttl_secs) {
            return Err(AppError::Config(
                "TOKEN_TTL_SECS must be between 60 and 2592000 (30 days)".to_string(),
            ));
        }

        Ok(())
    }

    /// Consume and return the config if it passes [`Config::validate`].
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
