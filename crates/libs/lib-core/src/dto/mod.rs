//! # Data Transfer Objects (DTOs)
//!
//! Request and response bodies of the REST API. Field names follow the
//! document-store convention (`_id`, `user`, `date`) clients already expect.

pub mod auth;
pub mod posts;

pub use auth::*;
pub use posts::*;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `{"msg": "..."}` body used for status replies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Read a request field as text whatever JSON type the client sent.
///
/// `null` reads as empty, numbers and booleans as their JSON text, so
/// badly typed fields reach validation instead of failing the whole body.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badly_typed_fields_read_as_text() {
        let login: LoginRequest =
            serde_json::from_str(r#"{"email":5,"password":null}"#).unwrap();
        let post: CreatePostRequest = serde_json::from_str(r#"{"text":["a"]}"#).unwrap();

        assert_eq!(login.email, "5");
        assert_eq!(login.password, "");
        assert_eq!(post.text, "");
    }
}
