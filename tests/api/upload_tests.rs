//! Upload API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{body_json, failing_storage, test_state, TestApp};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n0000IHDR";

/// Authenticated image upload returns a reference
#[tokio::test]
async fn test_upload_image() {
    let app = TestApp::new();
    let token = app.login("alice").await;

    let response = app.upload(Some(&token), "file", "image/png", PNG_BYTES).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["id"].as_str().unwrap();
    assert_eq!(body["url"], format!("/files/{}", id));
    assert_eq!(body["content_type"], "image/png");
    assert_eq!(body["size"], PNG_BYTES.len());
}

/// Upload without a token is rejected before storage
#[tokio::test]
async fn test_upload_requires_auth() {
    let app = TestApp::new();

    let response = app.upload(None, "file", "image/png", PNG_BYTES).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Non-image content is refused
#[tokio::test]
async fn test_upload_rejects_non_images() {
    let app = TestApp::new();
    let token = app.login("alice").await;

    let response = app
        .upload(Some(&token), "file", "application/pdf", b"%PDF-1.7")
        .await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

/// Empty files are refused
#[tokio::test]
async fn test_upload_rejects_empty_file() {
    let app = TestApp::new();
    let token = app.login("alice").await;

    let response = app.upload(Some(&token), "file", "image/png", b"").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The file must be in the `file` part
#[tokio::test]
async fn test_upload_requires_file_field() {
    let app = TestApp::new();
    let token = app.login("alice").await;

    let response = app
        .upload(Some(&token), "attachment", "image/png", PNG_BYTES)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Oversized files are refused
#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let mut settings = crate::common::test_settings();
    settings.storage.max_upload_bytes = 8;
    let state = ephemeral_chat::startup::AppState::from_settings(settings).unwrap();
    let app = TestApp::from_state(state);
    let token = app.login("alice").await;

    let response = app.upload(Some(&token), "file", "image/png", PNG_BYTES).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

/// Storage failures surface as a gateway error and leave chats alone
#[tokio::test]
async fn test_storage_failure_is_bad_gateway() {
    let app = TestApp::from_state(test_state().with_storage(failing_storage()));
    let token = app.login("alice").await;

    let response = app.upload(Some(&token), "file", "image/png", PNG_BYTES).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], 10010);
    assert!(app.chat_names(&token).await.is_empty());
}
