mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{message, TestApp};

#[tokio::test]
async fn test_register_returns_user_and_token() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "username": "alice", "password": "secret123" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["role"], "customer");
    assert!(body["user"]["_id"].is_string());
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new().await;
    app.register("alice", "customer").await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "username": "alice", "password": "another123" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "Username already exists");
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/api/auth/register", None, json!({ "username": "alice" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "username": "alice", "password": "123" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "username": "alice", "password": "secret123", "role": "owner" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = TestApp::new().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    app.register("alice", "admin").await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "alice", "password": "password123" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.register("alice", "customer").await;

    let (wrong_status, wrong_body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "alice", "password": "wrong-password" }),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "nobody", "password": "password123" }),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(message(&wrong_body), "Invalid credentials");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/auth/login", None, json!({ "username": "alice" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "Please provide username and password");
}

#[tokio::test]
async fn test_token_from_login_authorizes() {
    let app = TestApp::new().await;
    app.register("alice", "customer").await;

    let (_, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "alice", "password": "password123" }),
        )
        .await;
    let token = body["token"].as_str().unwrap();

    let (status, body) = app.get("/api/cart", Some(token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_missing_and_invalid_tokens() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/sweets", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(message(&body), "Not authorized, no token");

    let (status, body) = app.get("/api/sweets", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(message(&body), "Not authorized, token failed");
}

#[tokio::test]
async fn test_token_for_deleted_account_is_rejected() {
    let app = TestApp::new().await;
    let token = app.customer_token().await;

    let user = app.db.users().get_by_username("customer").await.unwrap().unwrap();
    assert!(app.db.users().delete(&user.id).await.unwrap());

    let (status, body) = app.get("/api/cart", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(message(&body), "Not authorized, token failed");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Sweetify API is running");

    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = app.get("/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/nothing-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), "Resource not found");
}
