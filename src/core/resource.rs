//! Resource trait and the record wrapper returned by listings

use crate::core::error::StorageError;
use crate::core::id::DocumentId;
use crate::core::store::{Document, StoredDocument};
use crate::core::validation::FromPayload;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key of the identifier in listed records
pub const ID_FIELD: &str = "_id";

/// A record type persisted in its own collection
pub trait Resource: FromPayload + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection the records are written to
    const COLLECTION: &'static str;

    /// Storage shape of the record, stamped with `created_at`/`updated_at`
    fn to_document(&self, now: DateTime<Utc>) -> Result<Document, StorageError> {
        let malformed = |message: String| StorageError::MalformedDocument {
            collection: Self::COLLECTION.to_string(),
            message,
        };

        let mut document = match serde_json::to_value(self).map_err(|e| malformed(e.to_string()))? {
            Value::Object(map) => map,
            _ => return Err(malformed("record did not serialize to an object".to_string())),
        };

        let stamp = Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true));
        document.insert("created_at".to_string(), stamp.clone());
        document.insert("updated_at".to_string(), stamp);
        Ok(document)
    }
}

/// A stored resource with its identifier rendered as text under `_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T: Resource> Record<T> {
    /// Decode a document read back from `T::COLLECTION`
    pub fn from_stored(stored: StoredDocument) -> Result<Self, StorageError> {
        let StoredDocument { id, mut fields } = stored;
        fields.insert(ID_FIELD.to_string(), Value::String(id.into_string()));

        serde_json::from_value(Value::Object(fields)).map_err(|e| {
            StorageError::MalformedDocument {
                collection: T::COLLECTION.to_string(),
                message: e.to_string(),
            }
        })
    }
}
