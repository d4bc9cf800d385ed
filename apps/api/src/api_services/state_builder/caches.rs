use std::sync::Arc;

use webaudit_application::CacheStore;
use webaudit_core::AppError;
use webaudit_infrastructure::{InMemoryCacheStore, RedisCacheStore};

use crate::api_config::ApiConfig;
use crate::api_services::redis::build_redis_client;

pub(super) fn build_cache_store(config: &ApiConfig) -> Result<Arc<dyn CacheStore>, AppError> {
    match config.redis_url.as_deref() {
        Some(redis_url) => {
            let client = build_redis_client(redis_url)?;
            tracing::info!(prefix = %config.cache_key_prefix, "using redis cache store");
            Ok(Arc::new(RedisCacheStore::new(
                client,
                config.cache_key_prefix.clone(),
            )))
        }
        None => {
            tracing::info!("REDIS_URL is not set, using in-process cache store");
            Ok(Arc::new(InMemoryCacheStore::new()))
        }
    }
}
