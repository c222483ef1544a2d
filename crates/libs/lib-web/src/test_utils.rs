//! Shared fixtures for handler and service tests.

use crate::server::{create_router, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use lib_auth::hash_password;
use lib_core::model::store::{create_pool, run_migrations, User, UserForCreate, UserRepository};
use lib_core::{Config, DbPool, DEFAULT_TOKEN_TTL_SECS};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        host: "127.0.0.1".to_string(),
        port: 5000,
        cors_origins: Vec::new(),
    }
}

/// Fresh in-memory database with the schema applied.
pub async fn setup_test_db() -> DbPool {
    let pool = create_pool("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

pub async fn seed_user(pool: &DbPool, name: &str, email: &str, password: &str) -> User {
    let password_hash = hash_password(password).expect("Password hashing should succeed in test");
    UserRepository::create(
        pool,
        UserForCreate::new(name.to_string(), email.to_string(), password_hash),
    )
    .await
    .expect("User creation should succeed in test")
}

/// Full router over a fresh database; the pool is returned for seeding.
pub async fn test_app() -> (Router, DbPool) {
    let pool = setup_test_db().await;
    let state = AppState::new(pool.clone(), test_config());
    (create_router(state), pool)
}

/// Send one request through the router and decode the JSON reply.
///
/// Non-JSON bodies come back as a JSON string.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (content_type, body) = match body {
        Some(json) => (Some("application/json"), json.to_string()),
        None => (None, String::new()),
    };
    send_raw(app, method, uri, token, content_type, &body).await
}

/// Like [`send`], with the body and its content type given verbatim.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("x-auth-token", token);
    }
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }

    let (status, _headers, json) = dispatch(app, builder.body(Body::from(body.to_string())).unwrap()).await;
    (status, json)
}

/// Run a prepared request, returning status, headers and decoded body.
pub async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, headers, json)
}

/// Log in through the API and return the issued token.
pub async fn login_token(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}
