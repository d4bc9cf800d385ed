use std::sync::Arc;

use async_trait::async_trait;
use webaudit_domain::AuditUrl;

use crate::audit_ports::{AuditError, AuditSource, CacheStore, ExternalAuditClient, RawAuditData};

/// Decorator that reuses recent real results of another audit client.
///
/// Synthetic results and errors are never cached. Cache failures behave as a
/// miss.
#[derive(Clone)]
pub struct CachedAuditClient {
    inner: Arc<dyn ExternalAuditClient>,
    cache_store: Arc<dyn CacheStore>,
    ttl_seconds: u32,
}

impl CachedAuditClient {
    /// Wraps an audit client with result caching.
    #[must_use]
    pub fn new(
        inner: Arc<dyn ExternalAuditClient>,
        cache_store: Arc<dyn CacheStore>,
        ttl_seconds: u32,
    ) -> Self {
        Self {
            inner,
            cache_store,
            ttl_seconds,
        }
    }

    fn cache_key(&self, url: &AuditUrl) -> String {
        format!("audit:{}:{}", self.inner.source(), url)
    }

    async fn cached(&self, key: &str) -> Option<RawAuditData> {
        let payload = match self.cache_store.get(key).await {
            Ok(payload) => payload?,
            Err(error) => {
                tracing::warn!(key, error = %error, "audit cache read failed");
                return None;
            }
        };

        match serde_json::from_str::<RawAuditData>(payload.as_str()) {
            Ok(raw) if !raw.is_synthetic() => Some(raw),
            Ok(_) => None,
            Err(error) => {
                tracing::warn!(key, error = %error, "discarding undecodable cached audit result");
                None
            }
        }
    }

    async fn store(&self, key: &str, raw: &RawAuditData) {
        let payload = match serde_json::to_string(raw) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(key, error = %error, "failed to encode audit result for cache");
                return;
            }
        };

        if let Err(error) = self.cache_store.set(key, payload, self.ttl_seconds).await {
            tracing::warn!(key, error = %error, "audit cache write failed");
        }
    }
}

#[async_trait]
impl ExternalAuditClient for CachedAuditClient {
    fn source(&self) -> AuditSource {
        self.inner.source()
    }

    async fn run_audit(&self, url: &AuditUrl) -> Result<RawAuditData, AuditError> {
        let key = self.cache_key(url);

        if let Some(raw) = self.cached(key.as_str()).await {
            tracing::info!(source = %self.source(), url = %url, "audit result served from cache");
            return Ok(raw);
        }

        let raw = self.inner.run_audit(url).await?;
        if !raw.is_synthetic() {
            self.store(key.as_str(), &raw).await;
        }

        Ok(raw)
    }
}
