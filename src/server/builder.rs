//! ServerBuilder for fluent API to build the HTTP server

use super::router::build_router;
use super::state::AppState;
use crate::config::ServerConfig;
use crate::core::store::DocumentStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the storefront server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new(ServerConfig::from_env())
///     .with_store(InMemoryDocumentStore::new())
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    config: ServerConfig,
    store: Option<Arc<dyn DocumentStore>>,
}

impl ServerBuilder {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            store: None,
        }
    }

    /// Set the document store
    ///
    /// Without a store the server still starts; storage-backed routes then
    /// answer with a storage error.
    pub fn with_store(self, store: impl DocumentStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Set an already shared document store
    pub fn with_shared_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build_state(self) -> AppState {
        if self.store.is_none() {
            tracing::warn!("No document store configured, storage routes will fail");
        }
        AppState::new(self.store, self.config)
    }

    /// Build the router with all routes and layers
    pub fn build(self) -> Router {
        build_router(self.build_state())
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to the configured host and port and handles SIGTERM and
    /// SIGINT (Ctrl+C).
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_address();
        let app = self.build();
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}


/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
