use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use webaudit_core::{AppError, OwnerId};
use webaudit_domain::{AuditRecord, AuditUrl, Category, Issue};

use crate::audit_ports::{AuditError, AuditErrorKind, AuditSource, ExternalAuditClient, RawAuditData};
use crate::recommendation_engine::RecommendationEngine;
use crate::result_normalizer::{IssueList, ResultNormalizer};

mod assembly;

const PERF_TESTER_NOT_CONFIGURED: &str = "performance tester is not configured";

/// Hard failures of one orchestration run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrchestrationError {
    /// The submitted address is not an absolute http(s) URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The performance tester account ran out of credits.
    #[error("insufficient credits: {0}")]
    InsufficientCredits(String),

    /// Normalization or assembly failed.
    #[error("internal orchestration error: {0}")]
    Internal(String),
}

impl From<OrchestrationError> for AppError {
    fn from(value: OrchestrationError) -> Self {
        match value {
            OrchestrationError::InvalidUrl(message) => Self::Validation(message),
            OrchestrationError::InsufficientCredits(message) => Self::InsufficientCredits(message),
            OrchestrationError::Internal(message) => Self::Internal(message),
        }
    }
}

/// Wall-clock budgets of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Budget of the page auditor call.
    pub page_audit_timeout: Duration,
    /// Global envelope around the performance tester, polling included.
    pub perf_test_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            page_audit_timeout: Duration::from_secs(120),
            perf_test_timeout: Duration::from_secs(300),
        }
    }
}

/// Coordinates external audits, normalization and recommendations into one
/// audit record.
#[derive(Clone)]
pub struct AuditOrchestrator {
    page_auditor: Arc<dyn ExternalAuditClient>,
    perf_tester: Option<Arc<dyn ExternalAuditClient>>,
    normalizer: ResultNormalizer,
    recommendation_engine: RecommendationEngine,
    config: OrchestratorConfig,
}

impl AuditOrchestrator {
    /// Creates an orchestrator without a performance tester.
    #[must_use]
    pub fn new(
        page_auditor: Arc<dyn ExternalAuditClient>,
        recommendation_engine: RecommendationEngine,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            page_auditor,
            perf_tester: None,
            normalizer: ResultNormalizer::new(),
            recommendation_engine,
            config,
        }
    }

    /// Adds the performance tester.
    #[must_use]
    pub fn with_perf_tester(mut self, perf_tester: Arc<dyn ExternalAuditClient>) -> Self {
        self.perf_tester = Some(perf_tester);
        self
    }

    /// Runs one complete audit of `url`.
    ///
    /// Provider failures degrade the affected sections, except quota
    /// exhaustion on the performance tester which aborts the run.
    pub async fn run(
        &self,
        url: &str,
        owner_id: Option<OwnerId>,
    ) -> Result<AuditRecord, OrchestrationError> {
        let url = AuditUrl::parse(url)
            .map_err(|error| OrchestrationError::InvalidUrl(error.to_string()))?;

        tracing::info!(url = %url, "starting audit run");

        let (page, perf) = tokio::try_join!(self.audit_page(&url), self.audit_performance(&url))?;

        let page_normalized = self
            .normalizer
            .normalize(&page, &url)
            .map_err(|error| internal(&url, "failed to normalize page audit", error))?;
        let perf_normalized = self
            .normalizer
            .normalize(&perf, &url)
            .map_err(|error| internal(&url, "failed to normalize performance test", error))?;

        let mut issues = IssueList::default();
        issues.extend(page_normalized.issues);
        issues.extend(perf_normalized.issues);

        let seo_issues = issues.take(Category::Seo);
        let performance_issues = issues.take(Category::Performance);
        let ui_ux_issues = issues.take(Category::UiUx);

        let (seo_issues, performance_issues, ui_ux_issues) = tokio::try_join!(
            self.recommend(&url, seo_issues, Category::Seo),
            self.recommend(&url, performance_issues, Category::Performance),
            self.recommend(&url, ui_ux_issues, Category::UiUx),
        )?;

        let record = assembly::assemble(assembly::AssemblyInput {
            url: url.clone(),
            owner_id,
            created_at: Utc::now(),
            page: assembly::SourceOutcome {
                provenance: page.provenance,
                metrics: page_normalized.metrics,
            },
            perf: assembly::SourceOutcome {
                provenance: perf.provenance,
                metrics: perf_normalized.metrics,
            },
            seo_issues,
            performance_issues,
            ui_ux_issues,
        })
        .map_err(|error| internal(&url, "failed to assemble audit record", error))?;

        tracing::info!(
            url = %url,
            degraded = record.is_degraded(),
            overall_score = record.overall_score(),
            "audit run completed"
        );

        Ok(record)
    }

    async fn audit_page(&self, url: &AuditUrl) -> Result<RawAuditData, OrchestrationError> {
        let source = self.page_auditor.source();
        let outcome = with_timeout(
            self.config.page_audit_timeout,
            self.page_auditor.run_audit(url),
        )
        .await;

        Ok(outcome.unwrap_or_else(|error| degrade(url, source, &error)))
    }

    async fn audit_performance(&self, url: &AuditUrl) -> Result<RawAuditData, OrchestrationError> {
        let Some(perf_tester) = self.perf_tester.as_ref() else {
            tracing::warn!(url = %url, "performance tester is not configured, substituting synthetic data");
            return Ok(RawAuditData::synthetic(
                AuditSource::PerfTester,
                PERF_TESTER_NOT_CONFIGURED,
            ));
        };

        let source = perf_tester.source();
        match with_timeout(self.config.perf_test_timeout, perf_tester.run_audit(url)).await {
            Ok(raw) => Ok(raw),
            Err(error) if error.kind == AuditErrorKind::QuotaExceeded => {
                tracing::warn!(url = %url, error = %error, "performance tester quota exhausted");
                Err(OrchestrationError::InsufficientCredits(
                    AuditErrorKind::QuotaExceeded.reason().to_owned(),
                ))
            }
            Err(error) => Ok(degrade(url, source, &error)),
        }
    }

    async fn recommend(
        &self,
        url: &AuditUrl,
        issues: Vec<Issue>,
        category: Category,
    ) -> Result<Vec<Issue>, OrchestrationError> {
        if issues.is_empty() {
            return Ok(issues);
        }

        let recommendations = self.recommendation_engine.generate(&issues, category).await;
        if recommendations.len() != issues.len() {
            return Err(internal(
                url,
                "recommendation count does not match issue count",
                format!(
                    "category {category}: {} issues, {} recommendations",
                    issues.len(),
                    recommendations.len()
                ),
            ));
        }

        Ok(issues
            .into_iter()
            .zip(recommendations)
            .map(|(issue, recommendation)| issue.with_recommendation(recommendation))
            .collect())
    }
}

async fn with_timeout<F>(budget: Duration, call: F) -> Result<RawAuditData, AuditError>
where
    F: Future<Output = Result<RawAuditData, AuditError>>,
{
    match tokio::time::timeout(budget, call).await {
        Ok(outcome) => outcome,
        Err(_) => Err(AuditError::timeout(format!(
            "no result within {} seconds",
            budget.as_secs()
        ))),
    }
}

fn degrade(url: &AuditUrl, source: AuditSource, error: &AuditError) -> RawAuditData {
    tracing::warn!(
        url = %url,
        source = %source,
        kind = %error.kind,
        error = %error.message,
        "external audit failed, substituting synthetic data"
    );
    RawAuditData::synthetic(source, error.kind.reason())
}

fn internal(url: &AuditUrl, context: &str, error: impl std::fmt::Display) -> OrchestrationError {
    tracing::error!(url = %url, error = %error, "{context}");
    OrchestrationError::Internal(format!("{context}: {error}"))
}

#[cfg(test)]
mod tests;
