//! Shopping cart held by a storefront client before checkout
//!
//! The cart is a plain value owned by its caller. Lines keep a snapshot
//! of the product taken when they were added.

use crate::models::{CreateOrderItemRequest, CreateOrderRequest, Product, ShippingDetails};

/// Drink modifiers chosen for a cart line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifiers {
    pub milk: String,
    pub sugar: String,
}

/// One line of the cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: i64,
    pub image_url: Option<String>,
    pub quantity: i64,
    pub modifiers: Modifiers,
}

impl CartLine {
    /// Price of the line, saturating at `i64::MAX`
    pub fn subtotal(&self) -> i64 {
        self.unit_price.saturating_mul(self.quantity)
    }
}

/// In-memory cart
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line for `product`; quantities below 1 are raised to 1
    ///
    /// Adding the same product twice yields two lines, since modifiers
    /// may differ between them.
    pub fn add(&mut self, product: &Product, quantity: i64, modifiers: Modifiers) {
        self.lines.push(CartLine {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            unit_price: product.price,
            image_url: product.image_url.clone(),
            quantity: quantity.max(1),
            modifiers,
        });
    }

    /// Remove the line at `index`, returning it if it existed
    pub fn remove(&mut self, index: usize) -> Option<CartLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of price times quantity over all lines
    pub fn total(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |total, line| total.saturating_add(line.subtotal()))
    }

    /// Build the order submission for the current contents
    pub fn checkout(&self, shipping: &ShippingDetails) -> CreateOrderRequest {
        let items = self
            .lines
            .iter()
            .map(|line| CreateOrderItemRequest {
                termek_nev: Some(line.product_name.clone()),
                termek_ar: Some(line.unit_price),
                mennyiseg: Some(line.quantity),
                tej: Some(line.modifiers.milk.clone()),
                cukor: Some(line.modifiers.sugar.clone()),
            })
            .collect();

        CreateOrderRequest {
            vevo_nev: Some(shipping.customer_name.clone()),
            telefon: Some(shipping.phone.clone()),
            email: Some(shipping.email.clone()),
            iranyitoszam: Some(shipping.postal_code.clone()),
            telepules: Some(shipping.city.clone()),
            utca_hazszam: Some(shipping.street_address.clone()),
            items: Some(items),
        }
    }
}
