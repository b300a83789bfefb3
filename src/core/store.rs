//! The document store seam
//!
//! Handlers never talk to a database driver directly. They go through
//! [`DocumentStore`], which offers exactly what the API needs: insert one
//! document and get its generated id back, find documents by exact-match
//! filter, plus two best-effort probes used by the diagnostics route.

use crate::core::error::StorageError;
use crate::core::id::DocumentId;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A document body as handed to the store (no identifier yet)
pub type Document = Map<String, Value>;

/// A document read back from the store
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub fields: Document,
}

/// Exact-match filter: every `(field, value)` pair must be equal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// A filter matching every document
    pub fn all() -> Self {
        Self::default()
    }

    /// Add an equality condition
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Whether `document` satisfies every condition
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }
}

/// Storage collaborator for all resources
///
/// Implementations must be safe to share across concurrently running
/// requests; the service holds a single instance for its whole lifetime.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document into `collection` and return its generated id
    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<DocumentId, StorageError>;

    /// Return up to `limit` documents of `collection` matching `filter`
    ///
    /// `None` means no limit.
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<StoredDocument>, StorageError>;

    /// Database name, if the backend has one
    fn database_name(&self) -> Option<String>;

    /// Names of the collections currently present
    async fn list_collection_names(&self) -> Result<Vec<String>, StorageError>;
}
