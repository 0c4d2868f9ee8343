//! Expiring key/value entries backing the database session store.

use chrono::Utc;

use super::DbPool;
use crate::Result;

/// Repository for the `sessions` table.
pub struct SessionRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert or replace an entry that expires `ttl_secs` from now.
    pub async fn set(&self, name: &str, value: &str, ttl_secs: i64) -> Result<()> {
        let expires_at = Utc::now().timestamp() + ttl_secs;
        sqlx::query(
            "INSERT INTO sessions (name, value, expires_at) VALUES (?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET value = excluded.value, expires_at = excluded.expires_at",
        )
        .bind(name)
        .bind(value)
        .bind(expires_at)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Get the value of a live (unexpired) entry.
    pub async fn get(&self, name: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM sessions WHERE name = ? AND expires_at > ?",
        )
        .bind(name)
        .bind(Utc::now().timestamp())
        .fetch_optional(self.pool)
        .await?;
        Ok(value)
    }

    /// Delete an entry. Returns true if a row was removed.
    pub async fn delete(&self, name: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE name = ?")
            .bind(name)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete expired entries (cleanup).
    pub async fn cleanup_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now().timestamp())
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
