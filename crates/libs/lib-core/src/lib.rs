//! # Core Library
//!
//! Configuration, error taxonomy, data transfer objects, and the user/post store.

pub mod config;
pub mod error;
pub mod model;
pub mod dto;

// Re-export commonly used types
pub use config::{Config, DEFAULT_TOKEN_TTL_SECS};
pub use error::{AppError, FieldError, Result};
pub use model::store::{DbPool, create_pool};
