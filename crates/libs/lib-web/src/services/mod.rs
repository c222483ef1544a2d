//! # Services Layer
//!
//! Business logic between the HTTP handlers and the store:
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → Repositories (SQLite)
//! ```
//!
//! - [`auth`] - credential checks, registration, token issuance, identity lookup
//! - [`posts`] - post creation, listing, lookup, author-only deletion
//!
//! Services are cheap structs built per request from the shared state and
//! return `Result<T, AppError>`; lower-level errors are converted here.

pub mod auth;
pub mod posts;

pub use auth::AuthService;
pub use posts::PostService;
