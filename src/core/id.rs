//! Opaque document identifiers
//!
//! Every backend generates its own identifier representation (a MongoDB
//! `ObjectId`, a UUID for the in-memory store). Handlers only ever see the
//! text form wrapped in [`DocumentId`], so the native representation never
//! reaches a response body.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-generated identifier, rendered as plain text at the API boundary
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<uuid::Uuid> for DocumentId {
    fn from(value: uuid::Uuid) -> Self {
        Self(value.to_string())
    }
}

#[cfg(feature = "mongodb_backend")]
impl From<mongodb::bson::oid::ObjectId> for DocumentId {
    fn from(value: mongodb::bson::oid::ObjectId) -> Self {
        Self(value.to_hex())
    }
}
