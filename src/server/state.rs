//! Shared application state handed to every handler

use crate::config::ServerConfig;
use crate::core::error::StorageError;
use crate::core::resource::Resource;
use crate::core::service::ResourceService;
use crate::core::store::DocumentStore;
use std::sync::Arc;

/// State shared by all requests
///
/// Holds the single long-lived store handle created at startup. The store
/// is optional: when no database is configured the service still answers
/// `/` and `/test`, and storage-backed routes fail with
/// [`StorageError::NotConfigured`].
#[derive(Clone)]
pub struct AppState {
    store: Option<Arc<dyn DocumentStore>>,
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn DocumentStore>>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> Option<&Arc<dyn DocumentStore>> {
        self.store.as_ref()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Service for resource `T` over the shared store
    pub fn service<T: Resource>(&self) -> Result<ResourceService<T>, StorageError> {
        self.store
            .clone()
            .map(ResourceService::new)
            .ok_or(StorageError::NotConfigured)
    }
}
