//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoDocumentStore`, a [`DocumentStore`] backed by a
//! `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag (enabled
//! by default).
//!
//! # Storage model
//!
//! One collection per resource (`menuitem`, `cateringrequest`, `order`).
//! MongoDB assigns the `_id` (an `ObjectId`) on insert; it is rendered as
//! its 24-character hex form when it leaves this module.
//!
//! # Serialization strategy
//!
//! Documents travel as `serde_json` maps and are converted to BSON at this
//! boundary. On the way back, `_id` is split off into the [`DocumentId`],
//! BSON dates and object ids anywhere in the document are turned into text,
//! and the rest is rendered as relaxed extended JSON.

use crate::core::error::StorageError;
use crate::core::id::DocumentId;
use crate::core::store::{Document as JsonDocument, DocumentStore, Filter, StoredDocument};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document};
use mongodb::{Client, Database};
use serde_json::Value;

const BACKEND: &str = "MongoDB";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a JSON object into a BSON Document.
fn json_to_document(json: JsonDocument) -> Result<Document, String> {
    match mongodb::bson::to_bson(&Value::Object(json)) {
        Ok(Bson::Document(doc)) => Ok(doc),
        Ok(_) => Err("Expected BSON document, got non-object".to_string()),
        Err(e) => Err(format!("Failed to convert JSON to BSON: {}", e)),
    }
}

/// Render store-native values that have no JSON equivalent as text.
fn normalize_bson(value: Bson) -> Bson {
    match value {
        Bson::ObjectId(oid) => Bson::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(text) => Bson::String(text),
            Err(_) => Bson::DateTime(dt),
        },
        Bson::Document(doc) => Bson::Document(
            doc.into_iter()
                .map(|(key, value)| (key, normalize_bson(value)))
                .collect(),
        ),
        Bson::Array(items) => Bson::Array(items.into_iter().map(normalize_bson).collect()),
        other => other,
    }
}

/// Text form of an inserted or stored `_id`.
fn bson_id_to_text(id: Bson) -> DocumentId {
    match id {
        Bson::ObjectId(oid) => DocumentId::from(oid),
        Bson::String(s) => DocumentId::from(s),
        other => DocumentId::from(other.to_string()),
    }
}

/// Split a BSON Document into its `_id` and a JSON body.
fn document_to_stored(mut doc: Document) -> Result<StoredDocument, String> {
    let id = doc
        .remove("_id")
        .map(bson_id_to_text)
        .ok_or_else(|| "document has no _id".to_string())?;

    match normalize_bson(Bson::Document(doc)).into_relaxed_extjson() {
        Value::Object(fields) => Ok(StoredDocument { id, fields }),
        _ => Err("Expected JSON object from BSON document".to_string()),
    }
}

/// Build the exact-match query document for a filter.
fn filter_to_document(filter: &Filter) -> Result<Document, String> {
    let mut query = Document::new();
    for (field, value) in filter.conditions() {
        let bson = mongodb::bson::to_bson(value)
            .map_err(|e| format!("Failed to convert filter on '{}': {}", field, e))?;
        query.insert(field.clone(), bson);
    }
    Ok(query)
}

// ---------------------------------------------------------------------------
// MongoDocumentStore
// ---------------------------------------------------------------------------

/// Document store backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use brewhouse::storage::MongoDocumentStore;
///
/// let store = MongoDocumentStore::connect("mongodb://localhost:27017", "coffee").await?;
/// let id = store.insert_one("menuitem", document).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoDocumentStore {
    database: Database,
}

impl MongoDocumentStore {
    /// Create a new `MongoDocumentStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Build a client for `uri` and select `database_name`.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation rather than here.
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, StorageError> {
        let client =
            Client::with_uri_str(uri)
                .await
                .map_err(|e| StorageError::ConnectionError {
                    backend: BACKEND.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self::new(client.database(database_name)))
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.database.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn insert_one(
        &self,
        collection: &str,
        document: JsonDocument,
    ) -> Result<DocumentId, StorageError> {
        let write_failed = |message: String| StorageError::WriteFailed {
            collection: collection.to_string(),
            message,
        };

        let doc = json_to_document(document).map_err(write_failed)?;

        let result = self
            .collection(collection)
            .insert_one(doc)
            .await
            .map_err(|e| write_failed(e.to_string()))?;

        Ok(bson_id_to_text(result.inserted_id))
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<StoredDocument>, StorageError> {
        let query_failed = |message: String| StorageError::QueryFailed {
            collection: collection.to_string(),
            message,
        };

        let query = filter_to_document(filter).map_err(query_failed)?;

        let coll = self.collection(collection);
        let mut find = coll.find(query);
        if let Some(limit) = limit {
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let docs: Vec<Document> = find
            .await
            .map_err(|e| query_failed(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| query_failed(e.to_string()))?;

        docs.into_iter()
            .map(|doc| {
                document_to_stored(doc).map_err(|message| StorageError::MalformedDocument {
                    collection: collection.to_string(),
                    message,
                })
            })
            .collect()
    }

    fn database_name(&self) -> Option<String> {
        Some(self.database.name().to_string())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StorageError> {
        self.database
            .list_collection_names()
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })
    }
}
