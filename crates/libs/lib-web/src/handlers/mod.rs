//! # HTTP Request Handlers
//!
//! Axum handlers organized by feature domain. Handlers validate the request
//! body, delegate to [`crate::services`], and shape the reply.
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: Session endpoints
//!   - `POST /api/auth` - Exchange email/password for a token
//!   - `GET /api/auth` - Current user for a valid token
//!
//! - **[`users`]**: Account endpoints
//!   - `POST /api/users` - Register and receive a token
//!
//! - **[`posts`]**: Post endpoints (reads are public, writes require a token)
//!   - `POST /api/posts` - Publish a post (token)
//!   - `GET /api/posts` - All posts, newest first
//!   - `GET /api/posts/{id}` - One post
//!   - `DELETE /api/posts/{id}` - Remove own post (token)
//!
//! ## Handler Architecture
//!
//! ```rust,ignore
//! async fn handler(
//!     State(pool): State<DbPool>,       // Shared state
//!     auth: AuthUser,                   // Verified caller
//!     JsonBody(req): JsonBody<Body>,    // Request body
//! ) -> Result<Json<Response>> {
//!     Ok(Json(response))
//! }
//! ```
//!
//! Protected endpoints take an [`AuthUser`](crate::middleware::AuthUser)
//! argument; a missing or bad token is answered with 401 before the handler
//! body runs. Errors are [`AppError`] values, which render themselves.

pub mod auth;
pub mod posts;
pub mod users;

use lib_core::{AppError, FieldError, Result};

/// Collects field errors so a request reports every failing field at once.
#[derive(Debug, Default)]
pub(crate) struct FieldChecks {
    errors: Vec<FieldError>,
}

impl FieldChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure on body field `param`, echoing its value.
    pub fn check(&mut self, param: &str, value: &str, outcome: std::result::Result<(), String>) {
        if let Err(msg) = outcome {
            self.errors.push(FieldError::body(param, value, msg));
        }
    }

    /// Like [`FieldChecks::check`], without echoing the value.
    pub fn check_secret(&mut self, param: &str, outcome: std::result::Result<(), String>) {
        if let Err(msg) = outcome {
            self.errors.push(FieldError::secret(param, msg));
        }
    }

    pub fn finish(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}
