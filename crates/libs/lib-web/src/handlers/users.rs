//! # User Registration Handler
//!
//! `POST /api/users` creates an account and signs the new user in.

use crate::handlers::FieldChecks;
use crate::middleware::JsonBody;
use crate::services::AuthService;
use axum::extract::{Json, State};
use lib_core::dto::{RegisterRequest, TokenResponse};
use lib_core::model::store::UserForCreate;
use lib_core::{Config, DbPool, Result};
use lib_utils::{validate_email, validate_min_length, validate_not_empty};
use tracing::{info, instrument};

/// Register handler.
///
/// # Validation
///
/// - Name must not be blank
/// - Email must be well-formed and not already registered
/// - Password must be at least 6 characters
#[instrument(skip_all, fields(email = %req.email))]
pub async fn register(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<Json<TokenResponse>> {
    info!("[REGISTER] New account request");

    let mut checks = FieldChecks::new();
    checks.check("name", &req.name, validate_not_empty(&req.name, "Name is required"));
    checks.check("email", &req.email, validate_email(&req.email));
    checks.check_secret(
        "password",
        validate_min_length(
            &req.password,
            6,
            "Please enter a password with 6 or more characters",
        ),
    );
    checks.finish()?;

    let mut new_user = UserForCreate::new(req.name, req.email, String::new());
    if let Some(avatar) = req.avatar.filter(|a| !a.trim().is_empty()) {
        new_user = new_user.avatar(avatar);
    }

    let token = AuthService::new(pool, config)
        .register(new_user, &req.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{seed_user, send, test_app, TEST_SECRET};
    use axum::http::StatusCode;
    use lib_auth::decode_jwt;
    use lib_core::model::store::UserRepository;
    use serde_json::json;

    #[tokio::test]
    async fn test_register_success() {
        let (app, pool) = test_app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/users",
            None,
            Some(json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "secret1",
                "avatar": "avatars/alice.png"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let claims = decode_jwt(body["token"].as_str().unwrap(), TEST_SECRET).unwrap();
        let user = UserRepository::find_by_id(&pool, claims.user_id())
            .await
            .unwrap()
            .expect("registered user should exist");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.avatar.as_deref(), Some("avatars/alice.png"));
        assert_ne!(user.password_hash, "secret1");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (app, pool) = test_app().await;
        seed_user(&pool, "Alice", "alice@example.com", "secret1").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/users",
            None,
            Some(json!({ "name": "Imposter", "email": "alice@example.com", "password": "secret2" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "errors": [{ "msg": "User already exists" }] }));
    }

    #[tokio::test]
    async fn test_register_reports_every_invalid_field() {
        let (app, _pool) = test_app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/users",
            None,
            Some(json!({ "name": "  ", "email": "nope", "password": "123" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let msgs: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["msg"].as_str().unwrap())
            .collect();
        assert_eq!(
            msgs,
            vec![
                "Name is required",
                "Please include a valid email",
                "Please enter a password with 6 or more characters",
            ]
        );
        assert!(body["errors"][2].get("value").is_none());
    }
}
