//! # Centralized Error Handling
//!
//! [`AppError`] is the single error type handlers return. Each variant is one
//! kind of failure and maps to exactly one HTTP response shape:
//!
//! | Variant | Status | Body |
//! |---|---|---|
//! | [`Validation`](AppError::Validation) | 400 | `{"errors":[{value,msg,param,location}]}` |
//! | [`InvalidCredentials`](AppError::InvalidCredentials) | 400 | `{"errors":[{"msg":"Invalid Credentials"}]}` |
//! | [`Conflict`](AppError::Conflict) | 400 | `{"errors":[{"msg":...}]}` |
//! | [`Unauthorized`](AppError::Unauthorized) | 401 | `{"msg":...}` |
//! | [`NotFound`](AppError::NotFound) | 404 | `{"msg":...}` |
//! | [`InvalidId`](AppError::InvalidId) | 404 | `{"msg":...}` |
//! | [`Config`](AppError::Config) / [`Internal`](AppError::Internal) | 500 | `Server Error` |
//!
//! Malformed identifiers answer like a missing record. Server
//! errors never expose their detail; it is written to the log instead.
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn find(found: bool) -> Result<&'static str> {
//!     if !found {
//!         return Err(AppError::NotFound("Post Not Found".to_string()));
//!     }
//!     Ok("post")
//! }
//! ```

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Generic body for every 5xx response.
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

/// Message shared by unknown-email and wrong-password login failures.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid Credentials";

/// One field-level validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl FieldError {
    /// Failure attached to a request body field.
    pub fn body(param: &str, value: &str, msg: impl Into<String>) -> Self {
        Self {
            value: Some(value.to_string()),
            msg: msg.into(),
            param: Some(param.to_string()),
            location: Some("body".to_string()),
        }
    }

    /// Failure on a body field whose value must not be echoed back.
    pub fn secret(param: &str, msg: impl Into<String>) -> Self {
        Self {
            value: None,
            msg: msg.into(),
            param: Some(param.to_string()),
            location: Some("body".to_string()),
        }
    }

    /// Failure not tied to any field.
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            value: None,
            msg: msg.into(),
            param: None,
            location: None,
        }
    }
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request body failed validation.
    #[error("Validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Unknown email or wrong password. The two cases are indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Request conflicts with existing data (e.g. email already registered).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Caller is authenticated but not allowed to act on the resource.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Identifier is not well-formed. Answered as not found.
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Unexpected failure (store, hashing, signing).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidCredentials | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) | AppError::InvalidId(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            AppError::Validation(errors) => {
                tracing::debug!("Client error: {} field error(s)", errors.len());
                (status, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::InvalidCredentials => {
                tracing::debug!("Client error: invalid credentials");
                let errors = [FieldError::message(INVALID_CREDENTIALS_MESSAGE)];
                (status, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::Conflict(msg) => {
                tracing::debug!("Client error: {}", msg);
                let errors = [FieldError::message(msg)];
                (status, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::Unauthorized(msg) | AppError::NotFound(msg) => {
                tracing::debug!("Client error: {} ({})", msg, status);
                (status, Json(json!({ "msg": msg }))).into_response()
            }
            AppError::InvalidId(msg) => {
                tracing::debug!("Client error: malformed id answered as {}", status);
                (status, Json(json!({ "msg": msg }))).into_response()
            }
            err @ (AppError::Config(_) | AppError::Internal(_)) => {
                tracing::error!("Server error: {}", err);
                (status, SERVER_ERROR_MESSAGE).into_response()
            }
        }
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                AppError::Internal(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, Vec<u8>) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_invalid_credentials_body() {
        let (status, body) = body_of(AppError::InvalidCredentials).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({ "errors": [{ "msg": "Invalid Credentials" }] }));
    }

    #[tokio::test]
    async fn test_validation_body() {
        let err = AppError::Validation(vec![FieldError::body(
            "email",
            "nope",
            "Please include a valid email",
        )]);
        let (status, body) = body_of(err).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"][0]["param"], "email");
        assert_eq!(json["errors"][0]["location"], "body");
        assert_eq!(json["errors"][0]["msg"], "Please include a valid email");
    }

    #[tokio::test]
    async fn test_invalid_id_answers_not_found() {
        let (status, body) = body_of(AppError::InvalidId("Post Not Found".to_string())).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, json!({ "msg": "Post Not Found" }));
    }

    #[tokio::test]
    async fn test_internal_detail_not_exposed() {
        let (status, body) = body_of(AppError::Internal("disk on fire".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, SERVER_ERROR_MESSAGE.as_bytes());
    }
}
