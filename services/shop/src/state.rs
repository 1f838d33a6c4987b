//! Application state shared across handlers

use auth::AuthService;
use sqlx::SqlitePool;

use crate::repositories::{OrderRepository, ProductRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub product_repository: ProductRepository,
    pub order_repository: OrderRepository,
    pub auth_service: AuthService,
}

impl AppState {
    /// Build the state around one pool
    pub fn new(pool: SqlitePool, auth_service: AuthService) -> Self {
        Self {
            product_repository: ProductRepository::new(pool.clone()),
            order_repository: OrderRepository::new(pool.clone()),
            db_pool: pool,
            auth_service,
        }
    }
}
