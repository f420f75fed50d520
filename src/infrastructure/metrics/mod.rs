//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, path, and status
//! - HTTP request latency histograms
//! - Registered chat gauge
//! - Login and upload outcome counters

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

const NAMESPACE: &str = "ephemeral_chat";

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace(NAMESPACE)
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Number of chats currently registered
pub static CHATS_REGISTERED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::with_opts(
        Opts::new("chats_registered", "Number of chats in the registry").namespace(NAMESPACE),
    )
    .expect("Failed to create CHATS_REGISTERED metric")
});

/// Login attempts by outcome ("success", "rejected")
pub static LOGINS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("logins_total", "Login attempts by outcome").namespace(NAMESPACE),
        &["outcome"],
    )
    .expect("Failed to create LOGINS_TOTAL metric")
});

/// Uploads by outcome ("stored", "failed")
pub static UPLOADS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("uploads_total", "File uploads by outcome").namespace(NAMESPACE),
        &["outcome"],
    )
    .expect("Failed to create UPLOADS_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(CHATS_REGISTERED.clone()))
        .expect("Failed to register CHATS_REGISTERED");
    registry
        .register(Box::new(LOGINS_TOTAL.clone()))
        .expect("Failed to register LOGINS_TOTAL");
    registry
        .register(Box::new(UPLOADS_TOTAL.clone()))
        .expect("Failed to register UPLOADS_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Helper to update the registered chat gauge
pub fn set_chats_registered(count: usize) {
    CHATS_REGISTERED.set(count as i64);
}

/// Helper to count a login attempt
pub fn record_login(success: bool) {
    let outcome = if success { "success" } else { "rejected" };
    LOGINS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Helper to count an upload attempt that reached storage
pub fn record_upload(stored: bool) {
    let outcome = if stored { "stored" } else { "failed" };
    UPLOADS_TOTAL.with_label_values(&[outcome]).inc();
}
