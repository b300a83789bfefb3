//! In-memory implementation of DocumentStore for testing and development

use crate::core::error::StorageError;
use crate::core::id::DocumentId;
use crate::core::store::{Document, DocumentStore, Filter, StoredDocument};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const BACKEND: &str = "in-memory";

/// In-memory document store
///
/// Collections are created on first insert and keep insertion order.
/// Identifiers are random UUIDs. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, Vec<StoredDocument>>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|collections| collections.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

fn poisoned(e: impl std::fmt::Display) -> StorageError {
    StorageError::ConnectionError {
        backend: BACKEND.to_string(),
        message: format!("lock poisoned: {}", e),
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<DocumentId, StorageError> {
        let mut collections = self.collections.write().map_err(poisoned)?;

        let id = DocumentId::from(Uuid::new_v4());
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                fields: document,
            });

        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<StoredDocument>, StorageError> {
        let collections = self.collections.read().map_err(poisoned)?;

        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|doc| filter.matches(&doc.fields))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    fn database_name(&self) -> Option<String> {
        Some(BACKEND.to_string())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StorageError> {
        let collections = self.collections.read().map_err(poisoned)?;
        let mut names: Vec<String> = collections.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
