//! Health, Metrics and CORS Tests

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{body_json, TestApp};

/// Health check is public and reports the chat count
#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();
    let token = app.login("alice").await;
    app.post_json_auth("/chats", &json!({ "name": "general" }), &token)
        .await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["chats"], 1);
}

/// Metrics are exposed in Prometheus text format
#[tokio::test]
async fn test_metrics_endpoint() {
    let app = TestApp::new();
    app.get("/health").await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("ephemeral_chat_http_requests_total"));
}

/// Every response carries the full CORS policy, errors included
#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = TestApp::new();
    let token = app.login("alice").await;

    let ok = app
        .send(
            Request::get("/chats")
                .header(header::ORIGIN, "https://somewhere.example")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    let unauthorized = app
        .send(
            Request::post("/chats")
                .header(header::ORIGIN, "https://somewhere.example")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "name": "general" }).to_string()))
                .unwrap(),
        )
        .await;

    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);
    for response in [&ok, &unauthorized] {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, PUT, POST, DELETE"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "*");
    }
}

/// Requests without an Origin still see the allowed methods and headers
#[tokio::test]
async fn test_cors_headers_without_origin() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    let headers = response.headers();
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
}

/// Preflight advertises methods and headers
#[tokio::test]
async fn test_cors_preflight() {
    let app = TestApp::new();

    let response = app
        .send(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/chats")
                .header(header::ORIGIN, "https://somewhere.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .to_string();
    for method in ["GET", "PUT", "POST", "DELETE"] {
        assert!(methods.contains(method), "{} missing from {}", method, methods);
    }
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "*");
}
