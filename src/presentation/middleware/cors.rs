//! CORS Middleware Configuration
//!
//! `CorsLayer` answers preflight requests. The allowed methods and headers
//! are also stamped onto every other response, errors included, so clients
//! see the same policy no matter which route answered.

use axum::http::{header, HeaderValue, Method};
use tower::ServiceBuilder;
use tower::layer::util::{Identity, Stack};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CorsSettings;

/// Methods advertised to cross-origin callers
const ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::PUT, Method::POST, Method::DELETE];

/// `ALLOWED_METHODS` as a header value
const ALLOWED_METHODS_HEADER: &str = "GET, PUT, POST, DELETE";

type CorsStack = Stack<
    SetResponseHeaderLayer<HeaderValue>,
    Stack<SetResponseHeaderLayer<HeaderValue>, Stack<CorsLayer, Identity>>,
>;

/// Create CORS layer from settings
pub fn create_cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer
            .allow_origin(origins)
            .max_age(std::time::Duration::from_secs(3600)) // 1 hour default
    }
}

/// CORS for every response: preflight handling plus allow-methods and
/// allow-headers on ordinary responses.
pub fn create_cors_stack(settings: &CorsSettings) -> ServiceBuilder<CorsStack> {
    ServiceBuilder::new()
        .layer(create_cors_layer(settings))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS_HEADER),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("*"),
        ))
}
