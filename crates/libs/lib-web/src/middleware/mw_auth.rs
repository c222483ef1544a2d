//! # Authentication Extractor
//!
//! Verifies the caller's session token and hands the caller id to the
//! handler as an explicit [`AuthUser`] argument. Handlers that take an
//! `AuthUser` are protected; handlers that don't are public.
//!
//! The token is read from the `x-auth-token` header, or from
//! `Authorization: Bearer <token>` when that header is absent.
//!
//! ```rust,ignore
//! use lib_web::middleware::AuthUser;
//!
//! async fn protected_handler(auth: AuthUser) -> String {
//!     format!("Hello, user {}!", auth.user_id)
//! }
//! ```

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use lib_auth::{decode_jwt, TokenError};
use lib_core::{dto::MessageResponse, Config};
use thiserror::Error;
use tracing::{debug, warn};

/// Header carrying the session token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// A caller whose token was verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

/// Why a request was refused at the auth check.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("no session token presented")]
    MissingToken,

    #[error("session token rejected: {0}")]
    InvalidToken(#[from] TokenError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let msg = match self {
            AuthRejection::MissingToken => "No token, authorization denied",
            AuthRejection::InvalidToken(_) => "Token is not valid",
        };

        (StatusCode::UNAUTHORIZED, Json(MessageResponse::new(msg))).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    Config: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts).ok_or_else(|| {
            warn!("[AUTH] Missing session token");
            AuthRejection::MissingToken
        })?;

        let config = Config::from_ref(state);
        let claims = decode_jwt(token, &config.jwt_secret).map_err(|e| {
            warn!("[AUTH] Token validation failed: {}", e);
            AuthRejection::InvalidToken(e)
        })?;

        debug!("[AUTH] Authenticated user id: {}", claims.user_id());

        Ok(AuthUser {
            user_id: claims.user.id,
        })
    }
}

/// Token from `x-auth-token`, falling back to a bearer `Authorization` header.
fn extract_token(parts: &Parts) -> Option<&str> {
    header_str(parts, AUTH_TOKEN_HEADER).or_else(|| {
        header_str(parts, AUTHORIZATION.as_str())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    })
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
