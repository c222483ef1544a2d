//! # Authentication Handlers
//!
//! ## Overview
//!
//! - `POST /api/auth` exchanges email and password for a session token
//! - `GET /api/auth` returns the user a valid token belongs to
//!
//! ## Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use lib_web::handlers::auth::{get_current_user, login};
//!
//! let app = Router::new().route("/api/auth", get(get_current_user).post(login));
//! ```

use crate::handlers::FieldChecks;
use crate::middleware::{AuthUser, JsonBody};
use crate::services::AuthService;
use axum::extract::{Json, State};
use lib_core::dto::{LoginRequest, TokenResponse, UserInfo};
use lib_core::{Config, DbPool, Result};
use lib_utils::{validate_email, validate_min_length};
use tracing::{debug, info, instrument};

/// Login handler - authenticates an existing user.
///
/// # Returns
///
/// * `Ok(TokenResponse)` - Credentials matched
/// * `Err(AppError::Validation)` - Malformed email or empty password
/// * `Err(AppError::InvalidCredentials)` - Unknown email or wrong password
#[instrument(skip_all, fields(email = %req.email))]
pub async fn login(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    info!("[LOGIN] Login attempt");

    let mut checks = FieldChecks::new();
    checks.check("email", &req.email, validate_email(&req.email));
    checks.check_secret(
        "password",
        validate_min_length(&req.password, 1, "Password is required"),
    );
    checks.finish()?;

    let token = AuthService::new(pool, config)
        .authenticate(&req.email, &req.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// Current user handler - the account behind the presented token.
#[instrument(skip(pool, config))]
pub async fn get_current_user(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    auth: AuthUser,
) -> Result<Json<UserInfo>> {
    debug!("[AUTH] Loading user {}", auth.user_id);

    let user = AuthService::new(pool, config)
        .current_user(&auth.user_id)
        .await?;

    Ok(Json(UserInfo::from(user)))
}

#[cfg(test)]
mod tests;
