//! # Authentication Library
//!
//! Password hashing and session token issuance/verification.

pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use pwd::{hash_password, verify_password, PwdError};
pub use token::{Claims, ClaimUser, TokenError, encode_jwt, decode_jwt};
