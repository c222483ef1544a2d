//! # Model Layer
//!
//! Store entities, identifiers, and repositories.

pub mod store;

use uuid::Uuid;

/// Generate a fresh opaque record id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Canonical form of a client-supplied id, or `None` when it is malformed.
pub fn parse_id(raw: &str) -> Option<String> {
    Uuid::parse_str(raw.trim()).ok().map(|id| id.to_string())
}
