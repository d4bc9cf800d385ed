use std::sync::Arc;

use webaudit_core::{AppError, AppResult, UserIdentity};
use webaudit_domain::{AuditId, StoredAudit};

use crate::audit_orchestrator::AuditOrchestrator;
use crate::audit_ports::{AuditRecordRepository, RenderedReport, ReportRenderer};

/// Use cases for running, reading and exporting audits.
#[derive(Clone)]
pub struct AuditService {
    orchestrator: AuditOrchestrator,
    repository: Arc<dyn AuditRecordRepository>,
    report_renderer: Arc<dyn ReportRenderer>,
}

impl AuditService {
    /// Creates an audit service.
    #[must_use]
    pub fn new(
        orchestrator: AuditOrchestrator,
        repository: Arc<dyn AuditRecordRepository>,
        report_renderer: Arc<dyn ReportRenderer>,
    ) -> Self {
        Self {
            orchestrator,
            repository,
            report_renderer,
        }
    }

    /// Runs and persists a new audit. Failed runs are never stored.
    pub async fn create_audit(
        &self,
        caller: Option<&UserIdentity>,
        url: &str,
    ) -> AppResult<StoredAudit> {
        let owner_id = caller.map(|identity| identity.owner_id().clone());
        let record = self.orchestrator.run(url, owner_id).await?;

        let id = self.repository.save(record.clone()).await?;
        tracing::info!(audit_id = %id, url = %record.url(), "audit stored");

        Ok(StoredAudit { id, record })
    }

    /// Returns one audit visible to the caller.
    pub async fn get_audit(
        &self,
        caller: Option<&UserIdentity>,
        audit_id: AuditId,
    ) -> AppResult<StoredAudit> {
        let audit = self
            .repository
            .find_by_id(audit_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("audit '{audit_id}' does not exist")))?;

        let visible = match audit.record.owner_id() {
            None => true,
            Some(owner_id) => caller.is_some_and(|identity| identity.owner_id() == owner_id),
        };

        if !visible {
            return Err(AppError::NotFound(format!(
                "audit '{audit_id}' does not exist"
            )));
        }

        Ok(audit)
    }

    /// Lists audits owned by the caller, newest first.
    pub async fn list_audits(&self, caller: &UserIdentity) -> AppResult<Vec<StoredAudit>> {
        self.repository.find_by_owner(caller.owner_id()).await
    }

    /// Renders the report of one audit visible to the caller.
    pub async fn render_report(
        &self,
        caller: Option<&UserIdentity>,
        audit_id: AuditId,
    ) -> AppResult<RenderedReport> {
        let audit = self.get_audit(caller, audit_id).await?;
        self.report_renderer.render(&audit).await
    }
}

#[cfg(test)]
mod tests;
