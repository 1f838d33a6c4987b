//! Order repository for database operations
//!
//! An order and its items are written in a single transaction: either
//! every row lands or none does.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::{error::DatabaseResult, id::generate_id};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;

use crate::models::{NewOrder, Order, OrderFilter, OrderItem, ShipStatus};

/// Order repository for database operations
#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &OrderFilter, table: &str) {
    if let Some(shipped) = filter.shipped {
        query
            .push(format!(" AND {}.shipped = ", table))
            .push_bind(shipped);
    }

    if let Some(email) = &filter.email {
        query
            .push(format!(" AND {}.email = ", table))
            .push_bind(email.clone());
    }
}

fn attach_items(orders: &mut [Order], items: Vec<OrderItem>) {
    let mut by_order: HashMap<String, Vec<OrderItem>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id.clone()).or_default().push(item);
    }

    for order in orders.iter_mut() {
        order.items = by_order.remove(&order.id).unwrap_or_default();
    }
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an order with all of its items atomically
    pub async fn create(&self, new_order: &NewOrder) -> DatabaseResult<Order> {
        let mut tx = self.pool.begin().await?;
        let shipping = &new_order.shipping;

        let mut order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (id, customer_name, phone, email, postal_code, city,
                                street_address, ordered_at, shipped, shipped_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, NULL)
            RETURNING id, customer_name, phone, email, postal_code, city,
                      street_address, ordered_at, shipped, shipped_at
            "#,
        )
        .bind(generate_id())
        .bind(&shipping.customer_name)
        .bind(&shipping.phone)
        .bind(&shipping.email)
        .bind(&shipping.postal_code)
        .bind(&shipping.city)
        .bind(&shipping.street_address)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for item in &new_order.items {
            let item = sqlx::query_as::<_, OrderItem>(
                r#"
                INSERT INTO order_items (id, order_id, product_name, unit_price, quantity, milk, sugar)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                RETURNING id, order_id, product_name, unit_price, quantity, milk, sugar
                "#,
            )
            .bind(generate_id())
            .bind(&order.id)
            .bind(&item.product_name)
            .bind(item.unit_price)
            .bind(item.quantity)
            .bind(&item.milk)
            .bind(&item.sugar)
            .fetch_one(&mut *tx)
            .await?;

            order.items.push(item);
        }

        tx.commit().await?;

        info!(
            "Created order {} with {} item(s)",
            order.id,
            order.items.len()
        );
        Ok(order)
    }

    /// Get all orders matching the filter, oldest first, with their items
    pub async fn get_all(&self, filter: &OrderFilter) -> DatabaseResult<Vec<Order>> {
        let mut tx = self.pool.begin().await?;

        let mut orders_query = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT o.id, o.customer_name, o.phone, o.email, o.postal_code, o.city,
                   o.street_address, o.ordered_at, o.shipped, o.shipped_at
            FROM orders o
            WHERE 1 = 1
            "#,
        );
        push_filters(&mut orders_query, filter, "o");
        orders_query.push(" ORDER BY o.ordered_at ASC, o.rowid ASC");

        let mut orders = orders_query
            .build_query_as::<Order>()
            .fetch_all(&mut *tx)
            .await?;

        let mut items_query = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT i.id AS id, i.order_id AS order_id, i.product_name AS product_name,
                   i.unit_price AS unit_price, i.quantity AS quantity,
                   i.milk AS milk, i.sugar AS sugar
            FROM order_items i
            JOIN orders o ON o.id = i.order_id
            WHERE 1 = 1
            "#,
        );
        push_filters(&mut items_query, filter, "o");
        items_query.push(" ORDER BY i.rowid ASC");

        let items = items_query
            .build_query_as::<OrderItem>()
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        attach_items(&mut orders, items);
        Ok(orders)
    }

    /// Find an order with its items by ID
    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Order>> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_name, phone, email, postal_code, city,
                   street_address, ordered_at, shipped, shipped_at
            FROM orders
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut order) = order else {
            return Ok(None);
        };

        order.items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_name, unit_price, quantity, milk, sugar
            FROM order_items
            WHERE order_id = ?
            ORDER BY rowid ASC
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(order))
    }

    /// Set or clear the shipped flag, stamping `shipped_at` accordingly
    pub async fn set_shipped(
        &self,
        id: &str,
        shipped: bool,
        now: DateTime<Utc>,
    ) -> DatabaseResult<Option<ShipStatus>> {
        let status = sqlx::query_as::<_, ShipStatus>(
            r#"
            UPDATE orders
            SET shipped = ?, shipped_at = ?
            WHERE id = ?
            RETURNING id, shipped, shipped_at
            "#,
        )
        .bind(shipped)
        .bind(shipped.then_some(now))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(status) = &status {
            info!("Order {} shipped flag set to {}", status.id, status.shipped);
        }

        Ok(status)
    }

    /// Delete an order; its items go with it
    pub async fn delete(&self, id: &str) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted order {}", id);
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewOrderItem, ProductChanges, ShippingDetails};
    use crate::repositories::ProductRepository;
    use common::database::init_test_pool;

    fn shipping(email: &str) -> ShippingDetails {
        ShippingDetails {
            customer_name: "Teszt".to_string(),
            phone: "+36301234567".to_string(),
            email: email.to_string(),
            postal_code: "1051".to_string(),
            city: "Budapest".to_string(),
            street_address: "Fő utca 1.".to_string(),
        }
    }

    fn item(name: &str, unit_price: i64, quantity: i64) -> NewOrderItem {
        NewOrderItem {
            product_name: name.to_string(),
            unit_price,
            quantity,
            milk: "Oat".to_string(),
            sugar: "1 spoon".to_string(),
        }
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_inserts_order_and_items() {
        let pool = init_test_pool().await.unwrap();
        let repo = OrderRepository::new(pool.clone());

        let order = repo
            .create(&NewOrder {
                shipping: shipping("t@example.com"),
                items: vec![item("Cappuccino", 850, 2), item("Espresso", 650, 1)],
            })
            .await
            .unwrap();

        assert!(!order.shipped);
        assert!(order.shipped_at.is_none());
        assert_eq!(order.items.len(), 2);
        assert!(order.items.iter().all(|i| i.order_id == order.id));
        assert_eq!(count(&pool, "orders").await, 1);
        assert_eq!(count(&pool, "order_items").await, 2);
    }

    #[tokio::test]
    async fn test_create_is_atomic() {
        let pool = init_test_pool().await.unwrap();
        let repo = OrderRepository::new(pool.clone());

        // The second item violates the unit_price CHECK constraint
        let result = repo
            .create(&NewOrder {
                shipping: shipping("t@example.com"),
                items: vec![item("Cappuccino", 850, 2), item("Broken", 0, 1)],
            })
            .await;

        assert!(result.is_err());
        assert_eq!(count(&pool, "orders").await, 0);
        assert_eq!(count(&pool, "order_items").await, 0);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = OrderRepository::new(init_test_pool().await.unwrap());
        let created = repo
            .create(&NewOrder {
                shipping: shipping("t@example.com"),
                items: vec![item("Latte", 900, 1)],
            })
            .await
            .unwrap();

        let found = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.customer_name, "Teszt");
        assert_eq!(found.items, created.items);

        assert!(repo.find_by_id("missing0").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_all_filters_and_attaches_items() {
        let repo = OrderRepository::new(init_test_pool().await.unwrap());

        let first = repo
            .create(&NewOrder {
                shipping: shipping("a@example.com"),
                items: vec![item("Latte", 900, 1), item("Espresso", 650, 3)],
            })
            .await
            .unwrap();
        let second = repo
            .create(&NewOrder {
                shipping: shipping("b@example.com"),
                items: vec![item("Americano", 700, 5)],
            })
            .await
            .unwrap();
        repo.set_shipped(&second.id, true, Utc::now()).await.unwrap();

        let all = repo.get_all(&OrderFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].items.len(), 2);
        assert_eq!(all[1].items.len(), 1);

        let shipped = repo
            .get_all(&OrderFilter {
                shipped: Some(true),
                email: None,
            })
            .await
            .unwrap();
        assert_eq!(shipped.len(), 1);
        assert_eq!(shipped[0].id, second.id);
        assert_eq!(shipped[0].items[0].product_name, "Americano");

        let by_email = repo
            .get_all(&OrderFilter {
                shipped: Some(false),
                email: Some("a@example.com".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id, first.id);

        let none = repo
            .get_all(&OrderFilter {
                shipped: Some(true),
                email: Some("a@example.com".to_string()),
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_set_shipped_toggles_timestamp() {
        let repo = OrderRepository::new(init_test_pool().await.unwrap());
        let order = repo
            .create(&NewOrder {
                shipping: shipping("t@example.com"),
                items: vec![item("Latte", 900, 1)],
            })
            .await
            .unwrap();

        let shipped = repo
            .set_shipped(&order.id, true, Utc::now())
            .await
            .unwrap()
            .unwrap();
        assert!(shipped.shipped);
        assert!(shipped.shipped_at.is_some());

        let reverted = repo
            .set_shipped(&order.id, false, Utc::now())
            .await
            .unwrap()
            .unwrap();
        assert!(!reverted.shipped);
        assert!(reverted.shipped_at.is_none());

        assert!(
            repo.set_shipped("missing0", true, Utc::now())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_cascades_to_items() {
        let pool = init_test_pool().await.unwrap();
        let repo = OrderRepository::new(pool.clone());
        let order = repo
            .create(&NewOrder {
                shipping: shipping("t@example.com"),
                items: vec![item("Latte", 900, 1), item("Doppio", 800, 2)],
            })
            .await
            .unwrap();

        assert!(repo.delete(&order.id).await.unwrap());
        assert!(!repo.delete(&order.id).await.unwrap());
        assert_eq!(count(&pool, "order_items").await, 0);
    }

    #[tokio::test]
    async fn test_items_survive_catalog_changes() {
        let pool = init_test_pool().await.unwrap();
        let orders = OrderRepository::new(pool.clone());
        let products = ProductRepository::new(pool);

        let cappuccino = products.find_by_id("c0ffee05").await.unwrap().unwrap();
        let order = orders
            .create(&NewOrder {
                shipping: shipping("t@example.com"),
                items: vec![item(&cappuccino.name, cappuccino.price, 2)],
            })
            .await
            .unwrap();

        products
            .update(
                &cappuccino.id,
                ProductChanges {
                    name: Some("Cappuccino Grande".to_string()),
                    price: Some(1200),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        products.delete(&cappuccino.id).await.unwrap();

        let reloaded = orders.find_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(reloaded.items[0].product_name, "Cappuccino");
        assert_eq!(reloaded.items[0].unit_price, 850);
    }
}
