//! # Brewhouse
//!
//! Backend for a coffee shop storefront: menu items, catering requests and
//! pickup orders over a JSON REST API, persisted in a document store.
//!
//! ## Pipeline
//!
//! Every request follows the same straight line:
//!
//! ```text
//! JSON body → Validated<T> (FromPayload) → ResourceService<T> → DocumentStore → {"id": "<text>"}
//! ```
//!
//! - **Validation**: each record type reads its payload field by field and
//!   reports every failing field at once (422).
//! - **Storage**: one [`DocumentStore`](core::DocumentStore) handle is built
//!   at startup and shared by all requests. MongoDB in production, an
//!   in-memory store for tests and local runs.
//! - **Identifiers**: store-generated ids leave the service only as text
//!   ([`DocumentId`](core::DocumentId)).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use brewhouse::prelude::*;
//!
//! let app = ServerBuilder::new(ServerConfig::from_env())
//!     .with_store(InMemoryDocumentStore::new())
//!     .build();
//! ```

pub mod config;
pub mod core;
pub mod models;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::config::{ServerConfig, StorageBackend};
    pub use crate::core::{
        DocumentId, DocumentStore, Filter, FromPayload, Record, Resource, ResourceService,
        ShopError, ShopResult, StorageError, Validated, ValidationError,
    };
    pub use crate::models::{CateringRequest, MenuItem, Order, OrderItem};
    pub use crate::server::{AppState, DiagnosticReport, ServerBuilder, build_router};
    pub use crate::storage::InMemoryDocumentStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoDocumentStore;
}
