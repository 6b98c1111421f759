//! Order view model returned by the lookup endpoint.
//!
//! Orders are fetched once per wizard run and never mutated on the client.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::id::{LineItemId, OrderId};

/// A single purchased line.
///
/// `price` is the unit price; the backend sends it as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub line_item_id: LineItemId,
    pub title: String,
    pub price: Decimal,
    pub quantity: u32,
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub created_at: String,
    pub currency: String,
    pub items: Vec<LineItem>,
}

impl Order {
    pub fn item(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.line_item_id == id)
    }

    pub fn contains_item(&self, id: &LineItemId) -> bool {
        self.item(id).is_some()
    }
}
