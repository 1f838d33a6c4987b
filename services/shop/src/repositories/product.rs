//! Product repository for database operations

use common::{error::DatabaseResult, id::generate_id};
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{NewProduct, Product, ProductChanges};

/// Product repository for database operations
#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the whole catalog
    pub async fn get_all(&self) -> DatabaseResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, image_url
            FROM products
            ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Find a product by ID
    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, image_url
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Create a new product
    pub async fn create(&self, new_product: &NewProduct) -> DatabaseResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, name, price, image_url)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, price, image_url
            "#,
        )
        .bind(generate_id())
        .bind(&new_product.name)
        .bind(new_product.price)
        .bind(&new_product.image_url)
        .fetch_one(&self.pool)
        .await?;

        info!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    /// Merge changes onto an existing product, returning None if it does not exist
    pub async fn update(
        &self,
        id: &str,
        changes: ProductChanges,
    ) -> DatabaseResult<Option<Product>> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, image_url FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let merged = changes.apply(existing);

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = ?, price = ?, image_url = ?
            WHERE id = ?
            RETURNING id, name, price, image_url
            "#,
        )
        .bind(&merged.name)
        .bind(merged.price)
        .bind(&merged.image_url)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Updated product {}", product.id);
        Ok(Some(product))
    }

    /// Delete a product by ID
    ///
    /// Existing order items keep their own copy of the name and price.
    pub async fn delete(&self, id: &str) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted product {}", id);
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::database::init_test_pool;

    async fn repository() -> ProductRepository {
        ProductRepository::new(init_test_pool().await.unwrap())
    }

    fn flat_white() -> NewProduct {
        NewProduct {
            name: "Flat White".to_string(),
            price: 950,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_get_all_returns_seeded_catalog() {
        let repo = repository().await;
        let products = repo.get_all().await.unwrap();

        assert_eq!(products.len(), 6);
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = repository().await;

        let created = repo.create(&flat_white()).await.unwrap();
        assert_eq!(created.name, "Flat White");
        assert_eq!(created.id.len(), 8);

        let found = repo.find_by_id(&created.id).await.unwrap();
        assert_eq!(found, Some(created));
        assert_eq!(repo.find_by_id("nem-letezo-id").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let repo = repository().await;
        let created = repo
            .create(&NewProduct {
                image_url: Some("/images/flat-white.jpg".to_string()),
                ..flat_white()
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                &created.id,
                ProductChanges {
                    price: Some(990),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Flat White");
        assert_eq!(updated.price, 990);
        assert_eq!(updated.image_url.as_deref(), Some("/images/flat-white.jpg"));

        let cleared = repo
            .update(
                &created.id,
                ProductChanges {
                    image_url: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cleared.image_url, None);
        assert_eq!(cleared.price, 990);
    }

    #[tokio::test]
    async fn test_update_unknown_product() {
        let repo = repository().await;
        let result = repo
            .update("missing0", ProductChanges::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repository().await;
        let created = repo.create(&flat_white()).await.unwrap();

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete(&created.id).await.unwrap());
        assert_eq!(repo.find_by_id(&created.id).await.unwrap(), None);
    }
}
