use crate::core::error::ValidationError;
use crate::core::resource::Resource;
use crate::core::validation::validators::min_value;
use crate::core::validation::{FieldReader, FromPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One line of an order, embedded in [`Order::items`]
///
/// `item_id` is the text id of a menu item. It is not checked against the
/// menu, and `name`/`price` are copies taken by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_id: String,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

impl OrderItem {
    fn read(fields: &mut FieldReader<'_>) -> Self {
        OrderItem {
            item_id: fields.required_str("item_id", &[]),
            name: fields.required_str("name", &[]),
            quantity: fields.required_integer("quantity", &[&min_value(1_i64)]),
            price: fields.required_number("price", &[&min_value(0.0)]),
        }
    }
}

/// A pickup order (collection `order`)
///
/// Totals are taken as sent; they are not recomputed from the items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub customer_name: String,
    pub phone: String,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    /// Free-form time or "ASAP"
    pub pickup_time: Option<String>,
}

impl FromPayload for Order {
    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut fields = FieldReader::new(payload)?;

        let order = Order {
            customer_name: fields.required_str("customer_name", &[]),
            phone: fields.required_str("phone", &[]),
            items: fields.required_list("items", OrderItem::read),
            subtotal: fields.required_number("subtotal", &[&min_value(0.0)]),
            tax: fields.required_number("tax", &[&min_value(0.0)]),
            total: fields.required_number("total", &[&min_value(0.0)]),
            pickup_time: fields.optional_str("pickup_time"),
        };

        fields.finish()?;
        Ok(order)
    }
}

impl Resource for Order {
    const COLLECTION: &'static str = "order";
}
