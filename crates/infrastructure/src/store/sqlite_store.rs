use async_trait::async_trait;
use chrono::Utc;
use dns_sentinel_application::ports::Store;
use dns_sentinel_domain::DomainError;
use sqlx::SqlitePool;
use tracing::{error, instrument};

/// Durable `Store` backed by a single `kv_store(key, value, expires_at)`
/// table. Expiry is checked lazily on read rather than via a background
/// sweep — matching the teacher's preference for simple queries over
/// background maintenance tasks where volume is low.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for SqliteStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let row: Option<(String, Option<i64>)> =
            sqlx::query_as("SELECT value, expires_at FROM kv_store WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    error!(key, error = %e, "sqlite store get failed");
                    DomainError::Store(e.to_string())
                })?;

        match row {
            Some((_, Some(expires_at))) if expires_at <= Utc::now().timestamp() => {
                self.delete(key).await?;
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, expires_at) VALUES (?, ?, NULL)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, expires_at = NULL",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(key, error = %e, "sqlite store set failed");
            DomainError::Store(e.to_string())
        })?;
        Ok(())
    }

    #[instrument(skip(self, value))]
    async fn set_with_ttl(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), DomainError> {
        let expires_at = Utc::now().timestamp() + ttl_secs as i64;
        sqlx::query(
            "INSERT INTO kv_store (key, value, expires_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, expires_at = excluded.expires_at",
        )
        .bind(key)
        .bind(value)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(key, error = %e, "sqlite store set_with_ttl failed");
            DomainError::Store(e.to_string())
        })?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(key, error = %e, "sqlite store delete failed");
                DomainError::Store(e.to_string())
            })?;
        Ok(())
    }
}
