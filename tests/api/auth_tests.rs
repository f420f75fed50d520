//! Authentication API Tests

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

use ephemeral_chat::application::services::{
    AccountCredentialVerifier, Credentials, OpenCredentialVerifier, SecurityModule,
};

use crate::common::{body_json, test_state, TestApp, TEST_SECRET};

/// Login with a username returns a bearer token
#[tokio::test]
async fn test_login_returns_token() {
    let app = TestApp::new();

    let response = app.post_json("/login", &json!({ "username": "alice" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 60 * 60);
}

/// Issued token validates against the app's security module
#[tokio::test]
async fn test_issued_token_validates() {
    let app = TestApp::new();

    let token = app.login("alice").await;

    let identity = app.state.security.validate(&token).unwrap();
    assert_eq!(identity.subject, "alice");
}

/// Empty username is a validation failure
#[tokio::test]
async fn test_login_with_empty_username_fails() {
    let app = TestApp::new();

    let response = app.post_json("/login", &json!({ "username": "" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10007);
    assert_eq!(body["errors"][0]["field"], "username");
}

/// Missing body fields are rejected with a JSON error
#[tokio::test]
async fn test_login_with_malformed_body_fails() {
    let app = TestApp::new();

    let response = app.post_json("/login", &json!({ "nickname": "alice" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10002);
    assert!(body.get("errors").is_none());
}

/// Configured accounts reject wrong passwords
#[tokio::test]
async fn test_login_with_invalid_credentials_fails() {
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};

    let hash = argon2::Argon2::default()
        .hash_password(b"correct horse", &SaltString::generate(&mut OsRng))
        .unwrap()
        .to_string();
    let verifier = AccountCredentialVerifier::new([("alice", hash)]).unwrap();
    let mut state = test_state();
    state.security = Arc::new(SecurityModule::new(
        TEST_SECRET.as_bytes(),
        Duration::minutes(5),
        "ephemeral-chat",
        Arc::new(verifier),
    ));
    let app = TestApp::from_state(state);

    let rejected = app
        .post_json("/login", &json!({ "username": "alice", "password": "battery staple" }))
        .await;
    let accepted = app
        .post_json("/login", &json!({ "username": "alice", "password": "correct horse" }))
        .await;

    assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(accepted.status(), StatusCode::OK);
}

/// Protected endpoint requires a token
#[tokio::test]
async fn test_protected_endpoint_requires_auth() {
    let app = TestApp::new();

    let response = app.get("/chats").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10003);
}

/// Garbage tokens are rejected
#[tokio::test]
async fn test_protected_endpoint_rejects_garbage_token() {
    let app = TestApp::new();

    let response = app.get_auth("/chats", "definitely.not.valid").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Expired tokens are rejected
#[tokio::test]
async fn test_protected_endpoint_rejects_expired_token() {
    let app = TestApp::new();
    let expired = app
        .state
        .security
        .login_at(&Credentials::new("alice", None), Utc::now() - Duration::days(1))
        .unwrap();

    let response = app.get_auth("/chats", &expired.token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Tokens minted with another secret are rejected
#[tokio::test]
async fn test_protected_endpoint_rejects_foreign_token() {
    let app = TestApp::new();
    let foreign = SecurityModule::new(
        b"another-secret-another-secret-000",
        Duration::minutes(5),
        "ephemeral-chat",
        Arc::new(OpenCredentialVerifier),
    )
    .login(&Credentials::new("mallory", None))
    .unwrap();

    let response = app.get_auth("/chats", &foreign.token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Non-bearer authorization schemes are rejected
#[tokio::test]
async fn test_basic_auth_scheme_is_rejected() {
    use axum::{body::Body, http::Request};

    let app = TestApp::new();
    let response = app
        .send(
            Request::get("/chats")
                .header("Authorization", "Basic YWxpY2U6c2VjcmV0")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
