//! Input validation for catalog and order requests
//!
//! Each function turns a loosely-typed request body into a validated
//! domain value, or returns a message naming the offending field.

use crate::models::{
    CreateOrderItemRequest, CreateOrderRequest, CreateProductRequest, NewOrder, NewOrderItem,
    NewProduct, OrderFilter, OrderListQuery, ProductChanges, ShipRequest, ShippingDetails,
    UpdateProductRequest,
};

/// Require a non-blank string field
pub fn validate_required(field: &str, value: Option<String>) -> Result<String, String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(format!("{} is required", field)),
    }
}

/// Require a positive integer field
pub fn validate_positive(field: &str, value: Option<i64>) -> Result<i64, String> {
    match value {
        Some(value) if value > 0 => Ok(value),
        Some(_) => Err(format!("{} must be a positive integer", field)),
        None => Err(format!("{} is required", field)),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validate an order submission
pub fn validate_order(request: CreateOrderRequest) -> Result<NewOrder, String> {
    let shipping = ShippingDetails {
        customer_name: validate_required("vevo_nev", request.vevo_nev)?,
        phone: validate_required("telefon", request.telefon)?,
        email: validate_required("email", request.email)?,
        postal_code: validate_required("iranyitoszam", request.iranyitoszam)?,
        city: validate_required("telepules", request.telepules)?,
        street_address: validate_required("utca_hazszam", request.utca_hazszam)?,
    };

    let items = request.items.unwrap_or_default();
    if items.is_empty() {
        return Err("items must contain at least one item".to_string());
    }

    let items = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| validate_order_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewOrder { shipping, items })
}

fn validate_order_item(index: usize, item: CreateOrderItemRequest) -> Result<NewOrderItem, String> {
    let field = |name: &str| format!("items[{}].{}", index, name);

    Ok(NewOrderItem {
        product_name: validate_required(&field("termek_nev"), item.termek_nev)?,
        unit_price: validate_positive(&field("termek_ar"), item.termek_ar)?,
        quantity: validate_positive(&field("mennyiseg"), item.mennyiseg)?,
        milk: validate_required(&field("tej"), item.tej)?,
        sugar: validate_required(&field("cukor"), item.cukor)?,
    })
}

/// Validate a new catalog product
pub fn validate_new_product(request: CreateProductRequest) -> Result<NewProduct, String> {
    Ok(NewProduct {
        name: validate_required("nev", request.name)?,
        price: validate_positive("ar", request.price)?,
        image_url: non_blank(request.image_url),
    })
}

/// Validate a partial product update
pub fn validate_product_changes(request: UpdateProductRequest) -> Result<ProductChanges, String> {
    let name = match request.name {
        Some(name) => Some(validate_required("nev", Some(name))?),
        None => None,
    };

    let price = match request.price {
        Some(price) => Some(validate_positive("ar", Some(price))?),
        None => None,
    };

    Ok(ProductChanges {
        name,
        price,
        image_url: request.image_url.map(non_blank),
    })
}

/// Parse the shipped flag; only the integers 0 and 1 are accepted
pub fn validate_ship_flag(request: ShipRequest) -> Result<bool, String> {
    match request.postazva.as_ref().and_then(serde_json::Value::as_i64) {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => Err("postazva must be 0 or 1".to_string()),
    }
}

/// Validate the order listing filter
pub fn validate_order_filter(query: OrderListQuery) -> Result<OrderFilter, String> {
    let shipped = match query.postazva.as_deref().map(str::trim) {
        None => None,
        Some("0") => Some(false),
        Some("1") => Some(true),
        Some(_) => return Err("postazva filter must be 0 or 1".to_string()),
    };

    Ok(OrderFilter {
        shipped,
        email: non_blank(query.email),
    })
}
