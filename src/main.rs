//! # Ephemeral Chat
//!
//! Backend for an ephemeral chat application.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Tokio runtime sized from configuration
//! - HTTP server

use anyhow::Result;
use tracing::info;

use ephemeral_chat::config::Settings;
use ephemeral_chat::startup::Application;

fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    ephemeral_chat::telemetry::init_tracing();

    info!("Starting Ephemeral Chat...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        workers = settings.server.workers,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // workers = 1 gives a single serialized worker, 0 one per core
    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    if settings.server.workers > 0 {
        runtime.worker_threads(settings.server.workers);
    }
    let runtime = runtime.enable_all().build()?;

    runtime.block_on(async {
        let application = Application::build(settings).await?;

        info!("Server ready to accept connections");
        application.run_until_stopped().await
    })
}
