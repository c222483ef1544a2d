//! # Session Tokens
//!
//! HS256 JWT issuance and verification. The payload carries the caller's
//! id as `{ "user": { "id": ... } }` alongside `iat`/`exp`.

use chrono::Duration;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use lib_utils::now_utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity embedded in a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimUser {
    pub id: String,
}

/// JWT claims for a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user: ClaimUser,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

/// Why a token could not be issued or accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Sign a session token for `user_id` that expires `ttl_secs` after issuance.
pub fn encode_jwt(user_id: &str, secret: &str, ttl_secs: i64) -> Result<String, TokenError> {
    let now = now_utc();
    let exp = now + Duration::seconds(ttl_secs);

    let claims = Claims {
        user: ClaimUser {
            id: user_id.to_string(),
        },
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify signature and expiry, returning the claims.
///
/// Expiry is checked without leeway: a token is rejected from the second
/// named by `exp` onwards.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    // jsonwebtoken still accepts a token whose `exp` equals the current second
    if claims.exp <= now_utc().timestamp() {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
