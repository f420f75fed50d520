//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use ephemeral_chat::config::Settings;
use ephemeral_chat::domain::{FileReference, FileStorage, StorageError};
use ephemeral_chat::startup::{build_router, AppState};

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

const BOUNDARY: &str = "X-EPHEMERAL-CHAT-BOUNDARY";

/// Test application builder
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Application with default settings, in-memory registry and storage
    pub fn new() -> Self {
        Self::from_state(test_state())
    }

    /// Application around a customised state
    pub fn from_state(state: AppState) -> Self {
        Self {
            router: build_router(state.clone()),
            state,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &Value) -> Response {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Make an authenticated GET request
    pub async fn get_auth(&self, uri: &str, token: &str) -> Response {
        self.send(
            Request::get(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make an authenticated POST request with JSON body
    pub async fn post_json_auth(&self, uri: &str, body: &Value, token: &str) -> Response {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Upload a single file part named `field`
    pub async fn upload(
        &self,
        token: Option<&str>,
        field: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Response {
        let mut builder = Request::post("/upload").header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(
            builder
                .body(Body::from(multipart_body(field, content_type, bytes)))
                .unwrap(),
        )
        .await
    }

    /// Log in and return the issued token
    pub async fn login(&self, username: &str) -> String {
        let response = self
            .post_json("/login", &json!({ "username": username }))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Names of all chats as seen through the API
    pub async fn chat_names(&self, token: &str) -> Vec<String> {
        let response = self.get_auth("/chats", token).await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["chats"]
            .as_array()
            .expect("chats array")
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect()
    }
}

pub fn test_settings() -> Settings {
    Settings::from_defaults(Some(TEST_SECRET)).unwrap()
}

pub fn test_state() -> AppState {
    AppState::from_settings(test_settings()).unwrap()
}

/// Read a response body as JSON
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn multipart_body(field: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"upload.bin\"\r\n",
            field
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Storage backend that always fails
pub struct FailingStorage;

#[async_trait]
impl FileStorage for FailingStorage {
    async fn store(&self, _bytes: Bytes, _content_type: &str) -> Result<FileReference, StorageError> {
        Err(StorageError::Unavailable("backend offline".into()))
    }
}

pub fn failing_storage() -> Arc<dyn FileStorage> {
    Arc::new(FailingStorage)
}
