//! Redis-backed shared cache.

use async_trait::async_trait;
use redis::AsyncCommands;
use webaudit_application::CacheStore;
use webaudit_core::{AppError, AppResult};

const SCAN_BATCH: usize = 500;

/// Redis implementation of the cache store port.
#[derive(Clone)]
pub struct RedisCacheStore {
    client: redis::Client,
    key_prefix: String,
}

impl RedisCacheStore {
    /// Creates a cache adapter with a configured Redis client and key prefix.
    #[must_use]
    pub fn new(client: redis::Client, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    fn key_for(&self, key: &str) -> String {
        format!("{}:{key}", self.key_prefix)
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|error| AppError::Internal(format!("failed to connect to redis: {error}")))
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut connection = self.connection().await?;

        connection
            .get(self.key_for(key))
            .await
            .map_err(|error| AppError::Internal(format!("failed to read cache entry: {error}")))
    }

    async fn set(&self, key: &str, value: String, ttl_seconds: u32) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        let mut connection = self.connection().await?;

        connection
            .set_ex(self.key_for(key), value, u64::from(ttl_seconds))
            .await
            .map_err(|error| AppError::Internal(format!("failed to write cache entry: {error}")))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut connection = self.connection().await?;

        connection
            .del(self.key_for(key))
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete cache entry: {error}")))
    }

    async fn flush(&self) -> AppResult<()> {
        let mut connection = self.connection().await?;
        let pattern = format!("{}:*", self.key_prefix);
        let mut cursor: u64 = 0;

        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern.as_str())
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut connection)
                .await
                .map_err(|error| AppError::Internal(format!("failed to scan cache keys: {error}")))?;

            if !keys.is_empty() {
                let _: () = connection.del(keys).await.map_err(|error| {
                    AppError::Internal(format!("failed to flush cache entries: {error}"))
                })?;
            }

            if next_cursor == 0 {
                break;
            }
            cursor = next_cursor;
        }

        tracing::info!(prefix = %self.key_prefix, "cache flushed");
        Ok(())
    }
}
