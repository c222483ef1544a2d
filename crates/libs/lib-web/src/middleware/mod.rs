//! # Middleware
//!
//! Axum middleware and extractors for authentication, JSON bodies,
//! request stamping, and request/response logging.
//!
//! ## Modules
//!
//! - **[`mw_auth`]**: session token verification extractor
//! - **[`mw_json`]**: JSON body extractor with validation-shaped rejections
//! - **[`mw_req_stamp`]**: request ID stamping
//! - **[`mw_logging`]**: request/response logging

// region: --- Modules
pub mod mw_auth;
pub mod mw_json;
pub mod mw_req_stamp;
pub mod mw_logging;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_auth::{AuthRejection, AuthUser, AUTH_TOKEN_HEADER};
pub use mw_json::JsonBody;
pub use mw_req_stamp::{stamp_req, RequestStamp, REQUEST_ID_HEADER};
pub use mw_logging::log_requests;
// endregion: --- Re-exports
