//! # Integration Tests
//!
//! Register, log in, and post as one session.

use super::*;

#[tokio::test]
async fn test_register_login_and_post() {
    let (app, _pool) = test_app().await;

    // Register
    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        None,
        Some(json!({ "name": "Carol", "email": "carol@example.com", "password": "hunter22" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let registered_token = body["token"].as_str().unwrap().to_string();

    // Login with the same credentials
    let token = login_token(&app, "carol@example.com", "hunter22").await;
    let (_, me) = send(&app, "GET", "/api/auth", Some(&token), None).await;
    let (_, me_again) = send(&app, "GET", "/api/auth", Some(&registered_token), None).await;
    assert_eq!(me["_id"], me_again["_id"]);

    // Post and read back
    let (status, post) = send(
        &app,
        "POST",
        "/api/posts",
        Some(&token),
        Some(json!({ "text": "first!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["user"], me["_id"]);
    assert_eq!(post["name"], "Carol");

    let (status, list) = send(&app, "GET", "/api/posts", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_root_and_unknown_route() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(&app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("API Running"));

    let (status, _) = send(&app, "GET", "/api/nothing-here", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
