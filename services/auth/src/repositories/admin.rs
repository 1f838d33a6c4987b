//! Admin repository for database operations

use chrono::Utc;
use common::{error::DatabaseResult, id::generate_id};
use sqlx::SqlitePool;
use tracing::info;

use crate::models::Admin;

/// Admin repository
#[derive(Clone)]
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    /// Create a new admin repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new admin from an already hashed password
    pub async fn create(&self, username: &str, password_hash: &str) -> DatabaseResult<Admin> {
        info!("Creating admin: {}", username);

        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (id, username, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(generate_id())
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Find an admin by username
    pub async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM admins
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Replace an admin's password hash, returning false if the admin is unknown
    pub async fn update_password_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> DatabaseResult<bool> {
        info!("Updating password for admin: {}", username);

        let result = sqlx::query("UPDATE admins SET password_hash = ? WHERE username = ?")
            .bind(password_hash)
            .bind(username)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
