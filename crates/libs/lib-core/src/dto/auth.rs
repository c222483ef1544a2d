//! # Authentication Data Transfer Objects
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/auth` - [`LoginRequest`] -> [`TokenResponse`]
//! - `GET /api/auth` - (token) -> [`UserInfo`]
//! - `POST /api/users` - [`RegisterRequest`] -> [`TokenResponse`]
//!
//! ## Wire Format
//!
//! Missing, `null`, or non-string request fields deserialize as strings so
//! that they surface as field validation errors rather than body parse
//! failures.
//!
//! ```text
//! POST /api/auth
//! Content-Type: application/json
//!
//! { "email": "alice@example.com", "password": "secret1" }
//! ```
//!
//! Response:
//! ```text
//! { "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
//! ```

use super::lenient_string;
use crate::model::store::User;
use lib_utils::format_time;
use serde::{Deserialize, Serialize};

/// Credentials presented to `POST /api/auth`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub password: String,
}

/// New account submitted to `POST /api/users`.
///
/// Password is sent in plaintext over HTTPS and hashed with Argon2 before
/// it is stored. Never log it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Successful authentication or registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
}

/// User as returned to clients. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub date: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            date: format_time(user.date),
        }
    }
}
