//! Records and payloads exchanged with the storefront API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::{AddressId, Entity, OrderId, OrderStatus, Price, ProductId};

// ─────────────────────────────────────────────────────────────────────────────
// Address Types
// ─────────────────────────────────────────────────────────────────────────────

/// A customer address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// The address ID.
    #[serde(rename = "_id", alias = "id")]
    pub id: AddressId,
    /// Recipient name.
    pub full_name: String,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Street address.
    pub address_line1: String,
    /// Apartment, suite, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    /// City.
    pub city: String,
    /// State/province.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal/ZIP code.
    pub postal_code: String,
    /// Country.
    pub country: String,
    /// Whether the backend marks this as the customer's default address.
    #[serde(default)]
    pub is_default: bool,
}

impl Entity for Address {
    type Id = AddressId;

    fn id(&self) -> &AddressId {
        &self.id
    }
}

impl Address {
    /// Format the address as a single line.
    #[must_use]
    pub fn formatted_single_line(&self) -> String {
        let mut parts = vec![self.address_line1.as_str()];

        if let Some(line2) = non_empty(self.address_line2.as_deref()) {
            parts.push(line2);
        }
        parts.push(&self.city);
        if let Some(state) = non_empty(self.state.as_deref()) {
            parts.push(state);
        }
        parts.push(&self.postal_code);
        parts.push(&self.country);

        parts
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Input for creating an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
}

/// Partial update for an address; unset fields are left alone by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl AddressPatch {
    /// Whether the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Order Types
// ─────────────────────────────────────────────────────────────────────────────

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// The order ID.
    #[serde(rename = "_id", alias = "id")]
    pub id: OrderId,
    /// Customer-facing order number (e.g., "#1001").
    pub order_number: String,
    /// Status as of the last fetch.
    pub status: OrderStatus,
    /// Line items.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Order total.
    pub total: Price,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// Where the order ships to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    /// Reason given when a return was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_reason: Option<String>,
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &OrderId {
        &self.id
    }
}

impl Order {
    /// Total number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// A line item on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Input for placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub items: Vec<OrderItemInput>,
    pub shipping_address_id: AddressId,
}

/// A product and quantity to order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Partial update for an order that has not shipped yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address_id: Option<AddressId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body of a return request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub reason: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_address() -> Address {
        Address {
            id: AddressId::new("a1"),
            full_name: "Ada Lovelace".to_string(),
            phone: None,
            address_line1: "12 St James's Square".to_string(),
            address_line2: Some(String::new()),
            city: "London".to_string(),
            state: None,
            postal_code: "SW1Y 4JH".to_string(),
            country: "UK".to_string(),
            is_default: false,
        }
    }

    #[test]
    fn test_address_wire_names() {
        let json = r#"{
            "_id": "a1",
            "fullName": "Ada Lovelace",
            "addressLine1": "12 St James's Square",
            "city": "London",
            "postalCode": "SW1Y 4JH",
            "country": "UK",
            "isDefault": true
        }"#;
        let address: Address = serde_json::from_str(json).unwrap();
        assert_eq!(address.id.as_str(), "a1");
        assert!(address.is_default);
        assert!(address.address_line2.is_none());
    }

    #[test]
    fn test_address_accepts_plain_id() {
        let json = r#"{"id":"a9","fullName":"x","addressLine1":"y","city":"z","postalCode":"1","country":"US"}"#;
        let address: Address = serde_json::from_str(json).unwrap();
        assert_eq!(address.id(), &AddressId::new("a9"));
    }

    #[test]
    fn test_formatted_single_line_skips_blank_parts() {
        assert_eq!(
            sample_address().formatted_single_line(),
            "12 St James's Square, London, SW1Y 4JH, UK"
        );
    }

    #[test]
    fn test_address_patch_serializes_only_set_fields() {
        let patch = AddressPatch {
            city: Some("Leeds".to_string()),
            ..AddressPatch::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"city":"Leeds"}"#);
        assert!(AddressPatch::default().is_empty());
    }

    #[test]
    fn test_order_decodes() {
        let json = r##"{
            "_id": "o1",
            "orderNumber": "#1001",
            "status": "shipped",
            "items": [
                {"productId": "p1", "name": "Tee", "quantity": 2, "unitPrice": "12.50"},
                {"productId": "p2", "name": "Cap", "quantity": 1, "unitPrice": 8}
            ],
            "total": {"amount": "33.00", "currencyCode": "USD"},
            "createdAt": "2026-03-01T12:00:00Z"
        }"##;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.items[0].line_total(), Decimal::new(2500, 2));
        assert!(order.shipping_address.is_none());
    }
}
