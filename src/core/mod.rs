//! Core module containing the fundamental types and traits of the service

pub mod error;
pub mod id;
pub mod resource;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{ShopError, ShopResult, StorageError, ValidationError};
pub use id::DocumentId;
pub use resource::{Record, Resource};
pub use service::ResourceService;
pub use store::{Document, DocumentStore, Filter, StoredDocument};
pub use validation::{FromPayload, Validated};
