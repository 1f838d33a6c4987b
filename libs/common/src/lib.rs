//! Common library for the NeoCoffee webshop
//!
//! This crate provides shared functionality used by the auth and shop
//! services, including SQLite connectivity, schema migrations, error
//! handling and record id generation.

pub mod database;
pub mod error;
pub mod id;

/// Example usage of the database module
///
/// ```rust,no_run
/// use common::database::{DatabaseConfig, close_pool, health_check, init_pool, run_migrations};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::from_env()?;
///     let pool = init_pool(&config).await?;
///     run_migrations(&pool).await?;
///     let is_healthy = health_check(&pool).await?;
///     println!("Database health check: {}", is_healthy);
///     close_pool(pool).await;
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
