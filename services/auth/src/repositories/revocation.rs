//! Revoked token store
//!
//! Logout records the token's `jti` here until the token would have
//! expired anyway. Stale rows are purged whenever a new one is written.
//! A token is still accepted during the second equal to its `exp`, so a
//! row is only stale once `expires_at` is strictly in the past.

use common::error::DatabaseResult;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

/// Revoked token repository
#[derive(Clone)]
pub struct RevocationRepository {
    pool: SqlitePool,
}

fn to_epoch(secs: u64) -> i64 {
    i64::try_from(secs).unwrap_or(i64::MAX)
}

impl RevocationRepository {
    /// Create a new revocation repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Revoke a token until `expires_at` (seconds since the epoch)
    pub async fn revoke(&self, jti: &Uuid, expires_at: u64, now: u64) -> DatabaseResult<()> {
        let mut tx = self.pool.begin().await?;

        let purged = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < ?")
            .bind(to_epoch(now))
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("INSERT OR IGNORE INTO revoked_tokens (jti, expires_at) VALUES (?, ?)")
            .bind(jti.to_string())
            .bind(to_epoch(expires_at))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("Revoked token {} ({} expired entries purged)", jti, purged);
        Ok(())
    }

    /// Check whether a token has been revoked
    pub async fn is_revoked(&self, jti: &Uuid) -> DatabaseResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM revoked_tokens WHERE jti = ?")
            .bind(jti.to_string())
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }
}
