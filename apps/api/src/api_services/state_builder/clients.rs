use std::sync::Arc;
use std::time::Duration;

use webaudit_application::{CacheStore, CachedAuditClient, ExternalAuditClient, TextGenerator};
use webaudit_core::AppError;
use webaudit_infrastructure::{
    GtmetrixAuditClient, GtmetrixConfig, MistralTextGenerator, PageSpeedAuditClient,
};

use crate::api_config::ApiConfig;

pub(super) struct AuditClients {
    pub http_client: reqwest::Client,
    pub page_auditor: Arc<dyn ExternalAuditClient>,
    pub perf_tester: Option<Arc<dyn ExternalAuditClient>>,
}

pub(super) fn build_audit_clients(
    config: &ApiConfig,
    cache_store: Arc<dyn CacheStore>,
) -> Result<AuditClients, AppError> {
    let http_client = reqwest::Client::builder()
        .user_agent(concat!("webaudit/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build http client: {error}")))?;

    let page_auditor: Arc<dyn ExternalAuditClient> = Arc::new(CachedAuditClient::new(
        Arc::new(PageSpeedAuditClient::new(
            http_client.clone(),
            config.pagespeed_api_base_url.clone(),
            config.pagespeed_api_key.clone(),
        )),
        cache_store.clone(),
        config.audit_result_cache_ttl_seconds,
    ));

    let perf_tester = match config.gtmetrix_api_key.as_deref() {
        Some(api_key) => {
            let gtmetrix = GtmetrixAuditClient::new(GtmetrixConfig {
                poll_interval: Duration::from_secs(config.gtmetrix_poll_interval_seconds),
                max_polls: config.gtmetrix_max_polls,
                ..GtmetrixConfig::new(config.gtmetrix_api_base_url.clone(), api_key)
            })?;
            let cached: Arc<dyn ExternalAuditClient> = Arc::new(CachedAuditClient::new(
                Arc::new(gtmetrix),
                cache_store,
                config.audit_result_cache_ttl_seconds,
            ));
            Some(cached)
        }
        None => {
            tracing::warn!(
                "GTMETRIX_API_KEY is not set, performance sections will be simulated"
            );
            None
        }
    };

    Ok(AuditClients {
        http_client,
        page_auditor,
        perf_tester,
    })
}

pub(super) fn build_text_generator(
    config: &ApiConfig,
    http_client: &reqwest::Client,
) -> Option<Arc<dyn TextGenerator>> {
    let Some(api_key) = config.mistral_api_key.as_deref() else {
        tracing::warn!("MISTRAL_API_KEY is not set, recommendations will use fallback texts");
        return None;
    };

    Some(Arc::new(MistralTextGenerator::new(
        http_client.clone(),
        config.mistral_api_base_url.clone(),
        api_key,
        config.mistral_model.clone(),
    )))
}
