//! # Auth Handler Tests
//!
//! Login and identity lookup, driven through the full router.

mod integration;

use crate::test_utils::{login_token, seed_user, send, send_raw, test_app, TEST_SECRET};
use axum::http::StatusCode;
use serde_json::json;
