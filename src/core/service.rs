//! Per-resource service over the shared document store

use crate::core::error::StorageError;
use crate::core::id::DocumentId;
use crate::core::resource::{Record, Resource};
use crate::core::store::{DocumentStore, Filter};
use chrono::Utc;
use std::marker::PhantomData;
use std::sync::Arc;

/// Create/list operations for one resource type
///
/// Stateless apart from the shared store handle; cloning is cheap.
pub struct ResourceService<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceService<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Resource> ResourceService<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Persist one record with a single write and return its new id
    pub async fn create(&self, record: &T) -> Result<DocumentId, StorageError> {
        let document = record.to_document(Utc::now())?;
        let id = self.store.insert_one(T::COLLECTION, document).await?;
        tracing::info!(collection = T::COLLECTION, %id, "document created");
        Ok(id)
    }

    /// Read back up to `limit` records matching `filter`
    pub async fn list(
        &self,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<Record<T>>, StorageError> {
        let documents = self.store.find(T::COLLECTION, filter, limit).await?;
        tracing::debug!(collection = T::COLLECTION, count = documents.len(), "documents listed");
        documents.into_iter().map(Record::from_stored).collect()
    }
}
