use async_trait::async_trait;
use webaudit_core::AppResult;

/// Shared key/value cache with per-entry ttl.
///
/// Entries older than their ttl must read as absent.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the cached value for one key.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores a value with ttl. A zero ttl stores nothing.
    async fn set(&self, key: &str, value: String, ttl_seconds: u32) -> AppResult<()>;

    /// Removes one key.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Removes every entry owned by this store.
    async fn flush(&self) -> AppResult<()>;
}
