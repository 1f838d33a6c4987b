//! Catalog models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Product record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: String,
    #[serde(rename = "nev")]
    pub name: String,
    /// Price in forints
    #[serde(rename = "ar")]
    pub price: i64,
    #[serde(rename = "kep_url")]
    pub image_url: Option<String>,
}

/// Request body for creating a product
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProductRequest {
    #[serde(rename = "nev")]
    pub name: Option<String>,
    #[serde(rename = "ar")]
    pub price: Option<i64>,
    #[serde(rename = "kep_url")]
    pub image_url: Option<String>,
}

/// Request body for a partial product update
///
/// `kep_url: null` clears the image, an absent `kep_url` keeps it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(rename = "nev")]
    pub name: Option<String>,
    #[serde(rename = "ar")]
    pub price: Option<i64>,
    #[serde(
        rename = "kep_url",
        default,
        deserialize_with = "super::deserialize_nullable"
    )]
    pub image_url: Option<Option<String>>,
}

/// Validated product ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub image_url: Option<String>,
}

/// Validated set of product changes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub image_url: Option<Option<String>>,
}

impl ProductChanges {
    /// Merge the changes onto an existing product
    pub fn apply(self, existing: Product) -> Product {
        Product {
            id: existing.id,
            name: self.name.unwrap_or(existing.name),
            price: self.price.unwrap_or(existing.price),
            image_url: self.image_url.unwrap_or(existing.image_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latte() -> Product {
        Product {
            id: "c0ffee06".to_string(),
            name: "Latte".to_string(),
            price: 900,
            image_url: Some("/images/latte.jpg".to_string()),
        }
    }

    #[test]
    fn test_product_wire_format() {
        let json = serde_json::to_value(latte()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "c0ffee06",
                "nev": "Latte",
                "ar": 900,
                "kep_url": "/images/latte.jpg"
            })
        );
    }

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let absent: UpdateProductRequest = serde_json::from_str(r#"{"ar": 950}"#).unwrap();
        assert_eq!(absent.image_url, None);
        assert_eq!(absent.price, Some(950));

        let cleared: UpdateProductRequest = serde_json::from_str(r#"{"kep_url": null}"#).unwrap();
        assert_eq!(cleared.image_url, Some(None));

        let set: UpdateProductRequest =
            serde_json::from_str(r#"{"kep_url": "/images/new.jpg"}"#).unwrap();
        assert_eq!(set.image_url, Some(Some("/images/new.jpg".to_string())));
    }

    #[test]
    fn test_apply_keeps_missing_fields() {
        let merged = ProductChanges {
            price: Some(990),
            ..Default::default()
        }
        .apply(latte());

        assert_eq!(merged.name, "Latte");
        assert_eq!(merged.price, 990);
        assert_eq!(merged.image_url.as_deref(), Some("/images/latte.jpg"));

        let cleared = ProductChanges {
            image_url: Some(None),
            ..Default::default()
        }
        .apply(latte());
        assert_eq!(cleared.image_url, None);
    }
}
