//! Integration tests for the infrastructure components
//!
//! These tests verify that a file-backed SQLite database is created,
//! migrated and that writes survive closing and reopening the pool.

use common::{
    database::{DatabaseConfig, close_pool, health_check, init_pool, run_migrations},
    id::generate_id,
};
use sqlx::Row;

/// Test that a database file survives a full open, write, close, reopen cycle
#[tokio::test]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join(format!("webshop-{}.db", generate_id()));
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}", path.display()),
        max_connections: 1,
        connection_timeout: 5,
    };

    let pool = init_pool(&config).await?;
    assert!(health_check(&pool).await?, "Database health check failed");

    run_migrations(&pool).await?;
    // Migrations are idempotent across restarts
    run_migrations(&pool).await?;

    sqlx::query("INSERT INTO products (id, name, price) VALUES ('feed0001', 'Flat White', 950)")
        .execute(&pool)
        .await?;

    close_pool(pool).await;

    let pool = init_pool(&config).await?;
    let row = sqlx::query("SELECT name, price FROM products WHERE id = 'feed0001'")
        .fetch_one(&pool)
        .await?;

    let name: String = row.get("name");
    let price: i64 = row.get("price");
    assert_eq!(name, "Flat White");
    assert_eq!(price, 950);

    close_pool(pool).await;
    let _ = std::fs::remove_file(&path);

    Ok(())
}
