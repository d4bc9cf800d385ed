use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use webaudit_application::{
    AuditOrchestrator, AuditService, OrchestratorConfig, RecommendationConfig,
    RecommendationEngine,
};
use webaudit_core::AppError;
use webaudit_infrastructure::TextReportRenderer;

use crate::api_config::ApiConfig;
use crate::state::AppState;

mod caches;
mod clients;
mod repositories;

pub fn build_app_state(pool: Option<PgPool>, config: &ApiConfig) -> Result<AppState, AppError> {
    let cache_store = caches::build_cache_store(config)?;
    let audit_clients = clients::build_audit_clients(config, cache_store.clone())?;

    let mut recommendation_engine = RecommendationEngine::new(RecommendationConfig {
        concurrency: config.recommendation_concurrency,
        cache_ttl_seconds: config.recommendation_cache_ttl_seconds,
        locale: config.recommendation_locale,
        ..RecommendationConfig::default()
    })
    .with_cache_store(cache_store);
    if let Some(text_generator) = clients::build_text_generator(config, &audit_clients.http_client)
    {
        recommendation_engine = recommendation_engine.with_text_generator(text_generator);
    }

    let mut orchestrator = AuditOrchestrator::new(
        audit_clients.page_auditor,
        recommendation_engine,
        OrchestratorConfig {
            page_audit_timeout: Duration::from_secs(config.page_audit_timeout_seconds),
            perf_test_timeout: Duration::from_secs(config.perf_test_timeout_seconds),
        },
    );
    if let Some(perf_tester) = audit_clients.perf_tester {
        orchestrator = orchestrator.with_perf_tester(perf_tester);
    }

    Ok(AppState {
        audit_service: AuditService::new(
            orchestrator,
            repositories::build_audit_record_repository(pool),
            Arc::new(TextReportRenderer::new()),
        ),
    })
}
