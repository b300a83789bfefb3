use crate::core::error::ValidationError;
use crate::core::resource::Resource;
use crate::core::validation::validators::{max_value, min_value};
use crate::core::validation::{FieldReader, FromPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Smallest accepted party size
pub const MIN_GUESTS: i64 = 1;
/// Largest accepted party size
pub const MAX_GUESTS: i64 = 1000;

/// A catering reservation request (collection `cateringrequest`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CateringRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// ISO date string, stored as given
    pub event_date: String,
    pub guests: i64,
    pub notes: Option<String>,
}

impl FromPayload for CateringRequest {
    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut fields = FieldReader::new(payload)?;

        let request = CateringRequest {
            name: fields.required_str("name", &[]),
            email: fields.required_str("email", &[]),
            phone: fields.required_str("phone", &[]),
            event_date: fields.required_str("event_date", &[]),
            guests: fields.required_integer(
                "guests",
                &[&min_value(MIN_GUESTS), &max_value(MAX_GUESTS)],
            ),
            notes: fields.optional_str("notes"),
        };

        fields.finish()?;
        Ok(request)
    }
}

impl Resource for CateringRequest {
    const COLLECTION: &'static str = "cateringrequest";
}
