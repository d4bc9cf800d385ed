//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_orchestrator;
mod audit_ports;
mod audit_service;
mod cached_audit_client;
mod recommendation_engine;
mod result_normalizer;

pub use audit_orchestrator::{AuditOrchestrator, OrchestrationError, OrchestratorConfig};
pub use audit_ports::{
    AuditError, AuditErrorKind, AuditRecordRepository, AuditSource, CacheStore, CategoryScores,
    ExternalAuditClient, LoadMetrics, PageFacts, RawAuditData, RawDiagnostic,
    RecommendationLocale, RecommendationPrompt, RenderedReport, ReportRenderer,
    TextGenerationError, TextGenerator,
};
pub use audit_service::AuditService;
pub use cached_audit_client::CachedAuditClient;
pub use recommendation_engine::{
    RecommendationConfig, RecommendationEngine, fallback_recommendation,
    recommendation_cache_key,
};
pub use result_normalizer::{IssueList, MetricSet, NormalizedAudit, ResultNormalizer};
