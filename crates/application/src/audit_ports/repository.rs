use async_trait::async_trait;
use webaudit_core::{AppResult, OwnerId};
use webaudit_domain::{AuditId, AuditRecord, StoredAudit};

/// Persistence port for completed audit records.
#[async_trait]
pub trait AuditRecordRepository: Send + Sync {
    /// Stores one record atomically and returns its new identifier.
    async fn save(&self, record: AuditRecord) -> AppResult<AuditId>;

    /// Finds one record by identifier.
    async fn find_by_id(&self, audit_id: AuditId) -> AppResult<Option<StoredAudit>>;

    /// Lists records of one owner, newest first.
    async fn find_by_owner(&self, owner_id: &OwnerId) -> AppResult<Vec<StoredAudit>>;
}
