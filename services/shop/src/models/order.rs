//! Order models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Order with its line items
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: String,
    #[serde(rename = "vevo_nev")]
    pub customer_name: String,
    #[serde(rename = "telefon")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "iranyitoszam")]
    pub postal_code: String,
    #[serde(rename = "telepules")]
    pub city: String,
    #[serde(rename = "utca_hazszam")]
    pub street_address: String,
    #[serde(rename = "megrendelve")]
    pub ordered_at: DateTime<Utc>,
    #[serde(rename = "postazva", serialize_with = "super::serialize_flag")]
    pub shipped: bool,
    /// Set exactly when `shipped` is true
    #[serde(rename = "postazva_datum")]
    pub shipped_at: Option<DateTime<Utc>>,
    #[sqlx(skip)]
    pub items: Vec<OrderItem>,
}

/// One line of an order
///
/// Name and price are copied from the catalog when the order is placed,
/// so later catalog edits never change a past order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct OrderItem {
    pub id: String,
    #[serde(rename = "rendeles_id")]
    pub order_id: String,
    #[serde(rename = "termek_nev")]
    pub product_name: String,
    #[serde(rename = "termek_ar")]
    pub unit_price: i64,
    #[serde(rename = "mennyiseg")]
    pub quantity: i64,
    #[serde(rename = "tej")]
    pub milk: String,
    #[serde(rename = "cukor")]
    pub sugar: String,
}

/// Request body for placing an order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub vevo_nev: Option<String>,
    pub telefon: Option<String>,
    pub email: Option<String>,
    pub iranyitoszam: Option<String>,
    pub telepules: Option<String>,
    pub utca_hazszam: Option<String>,
    pub items: Option<Vec<CreateOrderItemRequest>>,
}

/// One requested order line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrderItemRequest {
    pub termek_nev: Option<String>,
    pub termek_ar: Option<i64>,
    pub mennyiseg: Option<i64>,
    pub tej: Option<String>,
    pub cukor: Option<String>,
}

/// Customer and delivery details of an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingDetails {
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    pub postal_code: String,
    pub city: String,
    pub street_address: String,
}

/// Validated order ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub shipping: ShippingDetails,
    pub items: Vec<NewOrderItem>,
}

/// Validated order line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_name: String,
    pub unit_price: i64,
    pub quantity: i64,
    pub milk: String,
    pub sugar: String,
}

/// Query parameters for the order listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListQuery {
    pub postazva: Option<String>,
    pub email: Option<String>,
}

/// Validated order listing filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub shipped: Option<bool>,
    pub email: Option<String>,
}

/// Request body for toggling the shipped flag
///
/// Kept as a raw JSON value so that anything other than `0` or `1` can be
/// rejected with a validation error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShipRequest {
    pub postazva: Option<serde_json::Value>,
}

/// Shipping state of an order after a toggle
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShipStatus {
    pub id: String,
    #[serde(rename = "postazva", serialize_with = "super::serialize_flag")]
    pub shipped: bool,
    #[serde(rename = "postazva_datum")]
    pub shipped_at: Option<DateTime<Utc>>,
}
