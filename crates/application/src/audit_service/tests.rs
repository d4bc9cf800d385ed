use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use webaudit_core::{AppError, AppResult, OwnerId, UserIdentity};
use webaudit_domain::{AuditId, AuditRecord, AuditUrl, StoredAudit};

use crate::audit_orchestrator::{AuditOrchestrator, OrchestratorConfig};
use crate::audit_ports::{
    AuditError, AuditErrorKind, AuditRecordRepository, AuditSource, CategoryScores,
    ExternalAuditClient, RawAuditData, RawDiagnostic, RenderedReport, ReportRenderer,
};
use crate::recommendation_engine::{RecommendationConfig, RecommendationEngine};

use super::AuditService;

struct FakeAuditClient {
    source: AuditSource,
    outcome: Result<RawAuditData, AuditError>,
}

#[async_trait]
impl ExternalAuditClient for FakeAuditClient {
    fn source(&self) -> AuditSource {
        self.source
    }

    async fn run_audit(&self, _url: &AuditUrl) -> Result<RawAuditData, AuditError> {
        self.outcome.clone()
    }
}

#[derive(Default)]
struct FakeAuditRecordRepository {
    audits: Mutex<Vec<StoredAudit>>,
}

#[async_trait]
impl AuditRecordRepository for FakeAuditRecordRepository {
    async fn save(&self, record: AuditRecord) -> AppResult<AuditId> {
        let id = AuditId::new();
        self.audits.lock().await.push(StoredAudit { id, record });
        Ok(id)
    }

    async fn find_by_id(&self, audit_id: AuditId) -> AppResult<Option<StoredAudit>> {
        Ok(self
            .audits
            .lock()
            .await
            .iter()
            .find(|audit| audit.id == audit_id)
            .cloned())
    }

    async fn find_by_owner(&self, owner_id: &OwnerId) -> AppResult<Vec<StoredAudit>> {
        Ok(self
            .audits
            .lock()
            .await
            .iter()
            .rev()
            .filter(|audit| audit.record.owner_id() == Some(owner_id))
            .cloned()
            .collect())
    }
}

struct FakeReportRenderer;

#[async_trait]
impl ReportRenderer for FakeReportRenderer {
    async fn render(&self, audit: &StoredAudit) -> AppResult<RenderedReport> {
        Ok(RenderedReport {
            content_type: "text/plain; charset=utf-8",
            file_name: format!("audit-{}.txt", audit.id),
            bytes: audit.record.url().as_str().as_bytes().to_vec(),
        })
    }
}

fn page_result() -> RawAuditData {
    RawAuditData {
        scores: CategoryScores {
            seo: Some(0.5),
            accessibility: Some(0.5),
            ..CategoryScores::default()
        },
        diagnostics: vec![RawDiagnostic {
            id: "meta-description".to_owned(),
            title: Some("Document does not have a meta description".to_owned()),
            description: None,
            score: Some(0.0),
        }],
        ..RawAuditData::real(AuditSource::PageAuditor)
    }
}

fn service(
    perf_outcome: Result<RawAuditData, AuditError>,
) -> (AuditService, Arc<FakeAuditRecordRepository>) {
    let orchestrator = AuditOrchestrator::new(
        Arc::new(FakeAuditClient {
            source: AuditSource::PageAuditor,
            outcome: Ok(page_result()),
        }),
        RecommendationEngine::new(RecommendationConfig::default()),
        OrchestratorConfig::default(),
    )
    .with_perf_tester(Arc::new(FakeAuditClient {
        source: AuditSource::PerfTester,
        outcome: perf_outcome,
    }));
    let repository = Arc::new(FakeAuditRecordRepository::default());

    (
        AuditService::new(orchestrator, repository.clone(), Arc::new(FakeReportRenderer)),
        repository,
    )
}

fn identity(owner: &str) -> UserIdentity {
    UserIdentity::new(
        OwnerId::new(owner).unwrap_or_else(|_| unreachable!()),
        None,
    )
}

#[tokio::test]
async fn create_audit_persists_the_record_for_the_caller() {
    let (service, repository) = service(Ok(RawAuditData::real(AuditSource::PerfTester)));
    let alice = identity("alice");

    let stored = service
        .create_audit(Some(&alice), "https://example.com")
        .await;
    assert!(stored.is_ok());
    let stored = stored.unwrap_or_else(|_| unreachable!());

    assert_eq!(stored.record.owner_id(), Some(alice.owner_id()));
    assert_eq!(repository.audits.lock().await.len(), 1);

    let listed = service.list_audits(&alice).await;
    assert!(listed.is_ok_and(|audits| audits.len() == 1 && audits[0].id == stored.id));
}

#[tokio::test]
async fn insufficient_credits_are_not_persisted() {
    let (service, repository) = service(Err(AuditError::new(
        AuditErrorKind::QuotaExceeded,
        "402",
    )));

    let result = service.create_audit(None, "https://example.com").await;

    assert!(matches!(result, Err(AppError::InsufficientCredits(_))));
    assert!(repository.audits.lock().await.is_empty());
}

#[tokio::test]
async fn invalid_urls_are_validation_errors() {
    let (service, repository) = service(Ok(RawAuditData::real(AuditSource::PerfTester)));

    let result = service.create_audit(None, "not a url").await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(repository.audits.lock().await.is_empty());
}

#[tokio::test]
async fn foreign_audits_are_reported_as_missing() {
    let (service, _) = service(Ok(RawAuditData::real(AuditSource::PerfTester)));
    let alice = identity("alice");
    let bob = identity("bob");

    let stored = service
        .create_audit(Some(&alice), "https://example.com")
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(service.get_audit(Some(&alice), stored.id).await.is_ok());
    assert!(matches!(
        service.get_audit(Some(&bob), stored.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.get_audit(None, stored.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.render_report(Some(&bob), stored.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn anonymous_audits_are_readable_and_renderable() {
    let (service, _) = service(Ok(RawAuditData::real(AuditSource::PerfTester)));

    let stored = service
        .create_audit(None, "https://example.com")
        .await
        .unwrap_or_else(|_| unreachable!());

    let report = service.render_report(Some(&identity("carol")), stored.id).await;
    assert!(report.is_ok());
    let report = report.unwrap_or_else(|_| unreachable!());
    assert_eq!(report.bytes, b"https://example.com/".to_vec());
    assert_eq!(report.file_name, format!("audit-{}.txt", stored.id));
}

#[tokio::test]
async fn unknown_audits_are_not_found() {
    let (service, _) = service(Ok(RawAuditData::real(AuditSource::PerfTester)));

    let result = service.get_audit(None, AuditId::new()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
