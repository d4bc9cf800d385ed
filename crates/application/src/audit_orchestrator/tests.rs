use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use webaudit_core::{AppError, OwnerId};
use webaudit_domain::{AuditUrl, DataProvenance, SectionMetrics, Severity};

use crate::audit_ports::{
    AuditError, AuditErrorKind, AuditSource, CategoryScores, ExternalAuditClient, LoadMetrics,
    PageFacts, RawAuditData, RawDiagnostic, RecommendationLocale, RecommendationPrompt,
    TextGenerationError, TextGenerator,
};
use crate::recommendation_engine::{RecommendationConfig, RecommendationEngine};

use super::{AuditOrchestrator, OrchestrationError, OrchestratorConfig};

struct FakeAuditClient {
    source: AuditSource,
    outcome: Result<RawAuditData, AuditError>,
    latency: Duration,
    calls: Mutex<usize>,
}

impl FakeAuditClient {
    fn new(source: AuditSource, outcome: Result<RawAuditData, AuditError>) -> Self {
        Self {
            source,
            outcome,
            latency: Duration::from_secs(1),
            calls: Mutex::new(0),
        }
    }

    fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl ExternalAuditClient for FakeAuditClient {
    fn source(&self) -> AuditSource {
        self.source
    }

    async fn run_audit(&self, _url: &AuditUrl) -> Result<RawAuditData, AuditError> {
        *self.calls.lock().await += 1;
        tokio::time::sleep(self.latency).await;
        self.outcome.clone()
    }
}

struct RateLimitedTextGenerator;

#[async_trait]
impl TextGenerator for RateLimitedTextGenerator {
    async fn generate(
        &self,
        _prompt: &RecommendationPrompt,
    ) -> Result<String, TextGenerationError> {
        Err(TextGenerationError::RateLimited("429 Too Many Requests".to_owned()))
    }
}

struct EchoTextGenerator;

#[async_trait]
impl TextGenerator for EchoTextGenerator {
    async fn generate(&self, prompt: &RecommendationPrompt) -> Result<String, TextGenerationError> {
        Ok(format!("Resolve {}", prompt.check_id))
    }
}

fn diagnostic(id: &str, title: &str, score: f64) -> RawDiagnostic {
    RawDiagnostic {
        id: id.to_owned(),
        title: Some(title.to_owned()),
        description: None,
        score: Some(score),
    }
}

fn page_result() -> RawAuditData {
    RawAuditData {
        scores: CategoryScores {
            performance: Some(0.6),
            accessibility: Some(0.5),
            seo: Some(0.25),
        },
        diagnostics: vec![
            diagnostic("meta-description", "Document does not have a meta description", 0.2),
            diagnostic("canonical", "Document has a valid rel=canonical", 0.95),
            diagnostic("color-contrast", "Insufficient contrast", 0.0),
            diagnostic("render-blocking-resources", "Eliminate render-blocking resources", 0.5),
        ],
        page: Some(PageFacts {
            keywords: vec!["Example".to_owned(), "Domain".to_owned()],
            meta_description: None,
            canonical_url: None,
            interactive_time_ms: Some(3_200.0),
            viewport_score: Some(1.0),
            content_width_passed: Some(true),
        }),
        ..RawAuditData::real(AuditSource::PageAuditor)
    }
}

fn perf_result() -> RawAuditData {
    RawAuditData {
        load: Some(LoadMetrics {
            load_time_seconds: Some(2.5),
            page_size_kb: Some(512.0),
            requests: Some(42),
            grade: Some("B".to_owned()),
            performance_score: Some(81.0),
            structure_score: Some(93.0),
            ..LoadMetrics::default()
        }),
        ..RawAuditData::real(AuditSource::PerfTester)
    }
}

fn engine() -> RecommendationEngine {
    RecommendationEngine::new(RecommendationConfig {
        locale: RecommendationLocale::En,
        ..RecommendationConfig::default()
    })
    .with_text_generator(Arc::new(EchoTextGenerator))
}

fn orchestrator(
    page: FakeAuditClient,
    perf: Option<FakeAuditClient>,
    engine: RecommendationEngine,
) -> AuditOrchestrator {
    let orchestrator =
        AuditOrchestrator::new(Arc::new(page), engine, OrchestratorConfig::default());
    match perf {
        Some(perf) => orchestrator.with_perf_tester(Arc::new(perf)),
        None => orchestrator,
    }
}

#[tokio::test(start_paused = true)]
async fn successful_run_assembles_all_sections() {
    let orchestrator = orchestrator(
        FakeAuditClient::new(AuditSource::PageAuditor, Ok(page_result())),
        Some(FakeAuditClient::new(AuditSource::PerfTester, Ok(perf_result()))),
        engine(),
    );
    let owner_id = OwnerId::new("user-1").unwrap_or_else(|_| unreachable!());

    let record = orchestrator.run("https://example.com", Some(owner_id)).await;
    assert!(record.is_ok());
    let record = record.unwrap_or_else(|_| unreachable!());

    assert_eq!(record.url().as_str(), "https://example.com/");
    assert_eq!(record.owner_id().map(OwnerId::as_str), Some("user-1"));
    assert!(!record.is_degraded());

    assert_eq!(record.seo().score(), 25.0);
    assert_eq!(record.performance().score(), 81.0);
    assert_eq!(record.ui_ux().score(), 50.0);
    assert_eq!(record.performance().issues().len(), 1);
    assert_eq!(record.ui_ux().issues().len(), 1);
    assert!(matches!(
        record.performance().metrics(),
        SectionMetrics::Performance(metrics)
            if metrics.structure_score == Some(93.0) && metrics.grade.as_deref() == Some("B")
    ));

    for section in record.sections() {
        for issue in section.issues() {
            assert_eq!(issue.category(), section.category());
            assert_eq!(
                issue.recommendation(),
                Some(format!("Resolve {}", issue.source_key().check_id()).as_str())
            );
        }
    }
}

#[tokio::test(start_paused = true)]
async fn high_severity_seo_issue_and_real_performance() {
    let orchestrator = orchestrator(
        FakeAuditClient::new(AuditSource::PageAuditor, Ok(page_result())),
        Some(FakeAuditClient::new(AuditSource::PerfTester, Ok(perf_result()))),
        engine(),
    );

    let record = orchestrator
        .run("https://example.com", None)
        .await
        .unwrap_or_else(|_| unreachable!());

    let seo = record.seo().issues();
    let high: Vec<_> = seo
        .iter()
        .filter(|issue| issue.severity() == Severity::High)
        .collect();
    assert_eq!(high.len(), 1);
    assert_eq!(high[0].source_key().check_id(), "meta-description");
    assert_eq!(seo[0].severity(), Severity::High);
    assert_eq!(seo[1].severity(), Severity::Low);
    assert_eq!(record.performance().provenance(), &DataProvenance::Real);
}

#[tokio::test(start_paused = true)]
async fn perf_tester_quota_exhaustion_is_fatal() {
    let orchestrator = orchestrator(
        FakeAuditClient::new(AuditSource::PageAuditor, Ok(page_result())),
        Some(FakeAuditClient::new(
            AuditSource::PerfTester,
            Err(AuditError::new(AuditErrorKind::QuotaExceeded, "402 Payment Required")),
        )),
        engine(),
    );

    let result = orchestrator.run("https://example.com", None).await;

    assert!(matches!(
        result,
        Err(OrchestrationError::InsufficientCredits(_))
    ));
    let error: AppError = result
        .err()
        .unwrap_or_else(|| unreachable!())
        .into();
    assert!(matches!(error, AppError::InsufficientCredits(_)));
}

#[tokio::test(start_paused = true)]
async fn rate_limited_recommendations_fall_back_for_every_issue() {
    let engine = RecommendationEngine::new(RecommendationConfig {
        locale: RecommendationLocale::En,
        ..RecommendationConfig::default()
    })
    .with_text_generator(Arc::new(RateLimitedTextGenerator));
    let orchestrator = orchestrator(
        FakeAuditClient::new(AuditSource::PageAuditor, Ok(page_result())),
        Some(FakeAuditClient::new(AuditSource::PerfTester, Ok(perf_result()))),
        engine.clone(),
    );

    let record = orchestrator
        .run("https://example.com", None)
        .await
        .unwrap_or_else(|_| unreachable!());

    for section in record.sections() {
        for issue in section.issues() {
            let recommendation = issue.recommendation().unwrap_or_default();
            assert!(!recommendation.trim().is_empty());
            assert_eq!(recommendation, engine.fallback_for(issue));
        }
    }
}

#[tokio::test(start_paused = true)]
async fn page_auditor_timeout_degrades_page_sections_only() {
    let orchestrator = orchestrator(
        FakeAuditClient::new(AuditSource::PageAuditor, Ok(page_result()))
            .with_latency(Duration::from_secs(600)),
        Some(FakeAuditClient::new(AuditSource::PerfTester, Ok(perf_result()))),
        engine(),
    );

    let record = orchestrator
        .run("https://example.com", None)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(record.seo().provenance().is_simulated());
    assert_eq!(
        record.seo().provenance().degradation_reason(),
        Some(AuditErrorKind::Timeout.reason())
    );
    assert!(record.ui_ux().provenance().is_simulated());
    assert_eq!(record.seo().score(), 0.0);
    assert!(record.seo().issues().is_empty());
    assert_eq!(record.performance().provenance(), &DataProvenance::Real);
    assert!(record.is_degraded());
}

#[tokio::test(start_paused = true)]
async fn page_auditor_quota_exhaustion_is_not_fatal() {
    let orchestrator = orchestrator(
        FakeAuditClient::new(
            AuditSource::PageAuditor,
            Err(AuditError::new(AuditErrorKind::QuotaExceeded, "quota")),
        ),
        Some(FakeAuditClient::new(AuditSource::PerfTester, Ok(perf_result()))),
        engine(),
    );

    let record = orchestrator.run("https://example.com", None).await;

    assert!(record.is_ok_and(|record| record.seo().provenance().is_simulated()));
}

#[tokio::test(start_paused = true)]
async fn perf_tester_errors_degrade_the_performance_section() {
    let orchestrator = orchestrator(
        FakeAuditClient::new(AuditSource::PageAuditor, Ok(page_result())),
        Some(FakeAuditClient::new(
            AuditSource::PerfTester,
            Err(AuditError::upstream("test state error")),
        )),
        engine(),
    );

    let record = orchestrator
        .run("https://example.com", None)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(
        record.performance().provenance().degradation_reason(),
        Some(AuditErrorKind::UpstreamError.reason())
    );
    assert_eq!(record.performance().score(), 0.0);
    assert_eq!(record.performance().issues().len(), 1);
    assert_eq!(record.seo().provenance(), &DataProvenance::Real);
}

#[tokio::test(start_paused = true)]
async fn missing_perf_tester_is_a_degradation() {
    let orchestrator = orchestrator(
        FakeAuditClient::new(AuditSource::PageAuditor, Ok(page_result())),
        None,
        engine(),
    );

    let record = orchestrator
        .run("https://example.com", None)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(
        record.performance().provenance().degradation_reason(),
        Some("performance tester is not configured")
    );
}

#[tokio::test(start_paused = true)]
async fn invalid_urls_are_rejected_before_any_call() {
    let page = Arc::new(FakeAuditClient::new(AuditSource::PageAuditor, Ok(page_result())));
    let orchestrator =
        AuditOrchestrator::new(page.clone(), engine(), OrchestratorConfig::default());

    for url in ["", "example.com", "ftp://example.com/file", "/relative/path"] {
        let result = orchestrator.run(url, None).await;
        assert!(matches!(result, Err(OrchestrationError::InvalidUrl(_))));
    }
    assert_eq!(*page.calls.lock().await, 0);
}

#[tokio::test(start_paused = true)]
async fn both_auditors_run_concurrently() {
    let orchestrator = orchestrator(
        FakeAuditClient::new(AuditSource::PageAuditor, Ok(page_result()))
            .with_latency(Duration::from_secs(30)),
        Some(
            FakeAuditClient::new(AuditSource::PerfTester, Ok(perf_result()))
                .with_latency(Duration::from_secs(30)),
        ),
        engine(),
    );

    let started = tokio::time::Instant::now();
    let record = orchestrator.run("https://example.com", None).await;

    assert!(record.is_ok());
    assert!(started.elapsed() < Duration::from_secs(60));
}
