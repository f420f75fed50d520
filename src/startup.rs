//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::SecurityModule;
use crate::config::Settings;
use crate::domain::{ChatFactory, ChatRepository, FileStorage};
use crate::infrastructure::registry::ChatRegistry;
use crate::infrastructure::storage;
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
///
/// Every collaborator is owned here and injected into handlers; nothing is
/// reached through process-wide globals.
#[derive(Clone)]
pub struct AppState {
    pub security: Arc<SecurityModule>,
    pub chat_factory: Arc<ChatFactory>,
    pub chats: Arc<dyn ChatRepository>,
    pub storage: Arc<dyn FileStorage>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the default collaborators from settings: an empty registry and
    /// the configured storage backend.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let security = SecurityModule::from_settings(&settings.jwt, &settings.auth)
            .context("Failed to configure security module")?;
        let storage = storage::create_file_storage(&settings.storage);

        Ok(Self {
            security: Arc::new(security),
            chat_factory: Arc::new(ChatFactory::new(settings.chat.max_name_length)),
            chats: Arc::new(ChatRegistry::new()),
            storage,
            settings: Arc::new(settings),
        })
    }

    /// Replace the chat repository.
    pub fn with_chats(mut self, chats: Arc<dyn ChatRepository>) -> Self {
        self.chats = chats;
        self
    }

    /// Replace the file storage port.
    pub fn with_storage(mut self, storage: Arc<dyn FileStorage>) -> Self {
        self.storage = storage;
        self
    }
}

/// Build the full router with logging and CORS layers
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_stack(&state.settings.cors);

    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let addr = settings.server_addr();
        let state = AppState::from_settings(settings)?;
        tracing::info!(
            storage = ?state.settings.storage.backend,
            policy = ?state.settings.auth.policy,
            "Application state ready"
        );

        let router = build_router(state);

        // Bind to address
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Server stopped");
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
