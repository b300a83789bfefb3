use crate::core::error::ValidationError;
use crate::core::resource::Resource;
use crate::core::validation::validators::{min_value, non_empty};
use crate::core::validation::{FieldReader, FromPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An item on the menu (collection `menuitem`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// e.g. Coffee, Tea, Pastry
    pub category: String,
    /// Image URL
    pub image: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl FromPayload for MenuItem {
    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut fields = FieldReader::new(payload)?;

        let item = MenuItem {
            name: fields.required_str("name", &[&non_empty()]),
            description: fields.optional_str("description"),
            price: fields.required_number("price", &[&min_value(0.0)]),
            category: fields.required_str("category", &[]),
            image: fields.optional_str("image"),
            available: fields.bool_or("available", default_available()),
        };

        fields.finish()?;
        Ok(item)
    }
}

impl Resource for MenuItem {
    const COLLECTION: &'static str = "menuitem";
}
