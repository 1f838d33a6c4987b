//! API models for request and response payloads
//!
//! Field names on the wire follow the storefront client (`nev`, `ar`,
//! `vevo_nev`, ...); Rust-side names describe what the field holds.

use serde::{Deserialize, Deserializer, Serializer};

pub mod order;
pub mod product;

pub use order::{
    CreateOrderItemRequest, CreateOrderRequest, NewOrder, NewOrderItem, Order, OrderFilter,
    OrderItem, OrderListQuery, ShipRequest, ShipStatus, ShippingDetails,
};
pub use product::{
    CreateProductRequest, NewProduct, Product, ProductChanges, UpdateProductRequest,
};

/// Serialize a boolean as the `0`/`1` flag the client expects
pub(crate) fn serialize_flag<S: Serializer>(
    value: &bool,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`)
pub(crate) fn deserialize_nullable<'de, D, T>(
    deserializer: D,
) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
