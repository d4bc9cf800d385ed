use std::sync::Arc;

use sqlx::PgPool;
use webaudit_application::AuditRecordRepository;
use webaudit_infrastructure::{InMemoryAuditRecordRepository, PostgresAuditRecordRepository};

pub(super) fn build_audit_record_repository(
    pool: Option<PgPool>,
) -> Arc<dyn AuditRecordRepository> {
    match pool {
        Some(pool) => Arc::new(PostgresAuditRecordRepository::new(pool)),
        None => {
            tracing::warn!("DATABASE_URL is not set, audits are kept in memory only");
            Arc::new(InMemoryAuditRecordRepository::new())
        }
    }
}
