use anyhow::Result;
use brewhouse::config::{ServerConfig, StorageBackend};
use brewhouse::core::DocumentStore;
use brewhouse::server::ServerBuilder;
use brewhouse::storage::InMemoryDocumentStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("brewhouse=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let store = open_store(&config).await;

    let mut builder = ServerBuilder::new(config);
    if let Some(store) = store {
        builder = builder.with_shared_store(store);
    }
    builder.serve().await
}

/// Build the store selected by the configuration, if it can be built
async fn open_store(config: &ServerConfig) -> Option<Arc<dyn DocumentStore>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory document store");
            Some(Arc::new(InMemoryDocumentStore::new()))
        }
        StorageBackend::MongoDb => open_mongo(config).await,
    }
}

#[cfg(feature = "mongodb_backend")]
async fn open_mongo(config: &ServerConfig) -> Option<Arc<dyn DocumentStore>> {
    use brewhouse::storage::MongoDocumentStore;

    let Some((url, name)) = config.database() else {
        tracing::warn!("DATABASE_URL or DATABASE_NAME not set, running without a database");
        return None;
    };

    match MongoDocumentStore::connect(url, name).await {
        Ok(store) => {
            tracing::info!(database = name, "MongoDB client ready");
            Some(Arc::new(store))
        }
        Err(e) => {
            tracing::error!("{}", e);
            None
        }
    }
}

#[cfg(not(feature = "mongodb_backend"))]
async fn open_mongo(_config: &ServerConfig) -> Option<Arc<dyn DocumentStore>> {
    tracing::warn!("Built without the mongodb_backend feature, running without a database");
    None
}
