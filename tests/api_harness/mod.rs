//! Shared test harness for HTTP-level tests
//!
//! Provides store test doubles and payload builders:
//!
//! - [`RecordingStore`]: delegates to an in-memory store and records every
//!   call, so tests can assert that a rejected request never wrote anything
//! - [`FailingStore`]: every operation fails like an unreachable database
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod api_harness;
//! use api_harness::*;
//! ```

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use brewhouse::config::ServerConfig;
use brewhouse::core::{Document, DocumentId, DocumentStore, Filter, StorageError, StoredDocument};
use brewhouse::server::ServerBuilder;
use brewhouse::storage::InMemoryDocumentStore;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// RecordingStore
// ---------------------------------------------------------------------------

/// A `find` call as seen by the store
#[derive(Debug, Clone, PartialEq)]
pub struct FindCall {
    pub collection: String,
    pub filter: Filter,
    pub limit: Option<usize>,
}

#[derive(Clone, Default)]
pub struct RecordingStore {
    inner: InMemoryDocumentStore,
    inserts: Arc<Mutex<Vec<(String, Document)>>>,
    finds: Arc<Mutex<Vec<FindCall>>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inserts(&self) -> Vec<(String, Document)> {
        self.inserts.lock().unwrap().clone()
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.lock().unwrap().len()
    }

    pub fn finds(&self) -> Vec<FindCall> {
        self.finds.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<DocumentId, StorageError> {
        self.inserts
            .lock()
            .unwrap()
            .push((collection.to_string(), document.clone()));
        self.inner.insert_one(collection, document).await
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<StoredDocument>, StorageError> {
        self.finds.lock().unwrap().push(FindCall {
            collection: collection.to_string(),
            filter: filter.clone(),
            limit,
        });
        self.inner.find(collection, filter, limit).await
    }

    fn database_name(&self) -> Option<String> {
        Some("coffee_test".to_string())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StorageError> {
        self.inner.list_collection_names().await
    }
}

// ---------------------------------------------------------------------------
// FailingStore
// ---------------------------------------------------------------------------

/// Every operation fails with a connection-style error
#[derive(Clone, Default)]
pub struct FailingStore;

pub const FAILURE_MESSAGE: &str =
    "No servers available: server selection timeout after 30s, topology: Unknown";

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert_one(
        &self,
        collection: &str,
        _document: Document,
    ) -> Result<DocumentId, StorageError> {
        Err(StorageError::WriteFailed {
            collection: collection.to_string(),
            message: FAILURE_MESSAGE.to_string(),
        })
    }

    async fn find(
        &self,
        collection: &str,
        _filter: &Filter,
        _limit: Option<usize>,
    ) -> Result<Vec<StoredDocument>, StorageError> {
        Err(StorageError::QueryFailed {
            collection: collection.to_string(),
            message: FAILURE_MESSAGE.to_string(),
        })
    }

    fn database_name(&self) -> Option<String> {
        Some("coffee".to_string())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StorageError> {
        Err(StorageError::ConnectionError {
            backend: "MongoDB".to_string(),
            message: FAILURE_MESSAGE.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Servers
// ---------------------------------------------------------------------------

/// Configuration as if both database variables were set
pub fn configured() -> ServerConfig {
    ServerConfig {
        database_url: Some("mongodb://localhost:27017".to_string()),
        database_name: Some("coffee".to_string()),
        ..ServerConfig::default()
    }
}

pub fn server_with_store(store: impl DocumentStore + 'static) -> TestServer {
    let router = ServerBuilder::new(configured()).with_store(store).build();
    TestServer::new(router).unwrap()
}

pub fn server_without_store(config: ServerConfig) -> TestServer {
    TestServer::new(ServerBuilder::new(config).build()).unwrap()
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

pub fn menu_item(name: &str, price: f64, category: &str) -> Value {
    json!({ "name": name, "price": price, "category": category })
}

pub fn catering_request(guests: i64) -> Value {
    json!({
        "name": "Dana Whitfield",
        "email": "dana@example.com",
        "phone": "555-0101",
        "event_date": "2026-11-02",
        "guests": guests,
        "notes": "Oat milk on the side"
    })
}

pub fn order(quantity: i64) -> Value {
    json!({
        "customer_name": "Sam",
        "phone": "555-0199",
        "items": [
            { "item_id": "65f1a2b3c4d5e6f708192a3b", "name": "Latte", "quantity": quantity, "price": 4.5 }
        ],
        "subtotal": 4.5,
        "tax": 0.36,
        "total": 4.86,
        "pickup_time": "ASAP"
    })
}
