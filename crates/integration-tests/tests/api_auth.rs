//! Integration tests for authentication and bearer-token checks.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use minimart_core::Username;
use minimart_integration_tests::TestContext;

async fn message(resp: reqwest::Response) -> String {
    let body: Value = resp.json().await.unwrap();
    body["message"].as_str().unwrap().to_string()
}

// ============================================================================
// POST /authenticate
// ============================================================================

#[tokio::test]
async fn test_authenticate_returns_token() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/authenticate"))
        .json(&json!({ "username": "alice", "password": "wonderland" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let token: String = resp.json().await.unwrap();
    assert_eq!(ctx.tokens.validate(&token).unwrap().as_str(), "alice");
}

#[tokio::test]
async fn test_authenticate_wrong_password() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/authenticate"))
        .json(&json!({ "username": "alice", "password": "looking-glass" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Invalid username or password");
}

#[tokio::test]
async fn test_authenticate_unknown_user_same_reply() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/authenticate"))
        .json(&json!({ "username": "mallory", "password": "wonderland" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Invalid username or password");
}

#[tokio::test]
async fn test_authenticate_malformed_body() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/authenticate"))
        .header("Content-Type", "application/json")
        .body("{\"username\": \"alice\"")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!message(resp).await.is_empty());
}

#[tokio::test]
async fn test_authenticate_empty_password() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/authenticate"))
        .json(&json!({ "username": "alice", "password": "" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Password is required");
}

// ============================================================================
// Authorization header
// ============================================================================

#[tokio::test]
async fn test_missing_authorization_header() {
    let ctx = TestContext::new().await;

    for path in ["/carts", "/products"] {
        let resp = ctx.client.get(ctx.url(path)).send().await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(message(resp).await, "An authorization header is required");
    }
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    for value in [token.clone(), format!("Basic {token}"), format!("Bearer {token} extra")] {
        let resp = ctx
            .client
            .get(ctx.url("/carts"))
            .header("Authorization", value)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message(resp).await, "Cannot parse authorization header");
    }
}

#[tokio::test]
async fn test_invalid_token() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .authed(ctx.client.get(ctx.url("/carts")), "not.a.token")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Invalid authorization token");
}

#[tokio::test]
async fn test_token_from_other_server_rejected() {
    let ctx = TestContext::new().await;

    // A token with valid shape signed by a different secret
    let other = minimart_api::services::TokenService::new(
        &secrecy::SecretString::from("Zx9!Lm3#Qw7$Er5%Ty1^Ui8&Op2*As4(".to_string()),
        minimart_api::services::auth::DEFAULT_TOKEN_TTL,
    );
    let forged = other.issue(&Username::parse("alice").unwrap()).unwrap();

    let resp = ctx
        .authed(ctx.client.get(ctx.url("/carts")), &forged)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Invalid authorization token");
}

// ============================================================================
// Health checks and request IDs
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::new().await;

    let resp = ctx.client.get(ctx.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = ctx.client.get(ctx.url("/health/ready")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_header() {
    let ctx = TestContext::new().await;

    let resp = ctx.client.get(ctx.url("/health")).send().await.unwrap();
    assert!(resp.headers().contains_key("x-request-id"));

    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .header("x-request-id", "req-123")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "req-123");
}
