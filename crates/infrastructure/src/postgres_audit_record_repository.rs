//! PostgreSQL-backed audit record repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use webaudit_application::AuditRecordRepository;
use webaudit_core::{AppError, AppResult, OwnerId};
use webaudit_domain::{AuditId, AuditRecord, StoredAudit};

/// PostgreSQL implementation of the audit record repository.
///
/// The record aggregate is stored as one JSONB document so a save is a
/// single-row insert. Owner and creation time are mirrored into columns for
/// listing.
#[derive(Clone)]
pub struct PostgresAuditRecordRepository {
    pool: PgPool,
}

impl PostgresAuditRecordRepository {
    /// Creates a repository from a shared pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AuditRecordRow {
    id: Uuid,
    record: serde_json::Value,
}

impl TryFrom<AuditRecordRow> for StoredAudit {
    type Error = AppError;

    fn try_from(row: AuditRecordRow) -> Result<Self, Self::Error> {
        let record = serde_json::from_value::<AuditRecord>(row.record).map_err(|error| {
            AppError::Internal(format!(
                "failed to decode stored audit record '{}': {error}",
                row.id
            ))
        })?;

        Ok(Self {
            id: AuditId::from_uuid(row.id),
            record,
        })
    }
}

#[async_trait]
impl AuditRecordRepository for PostgresAuditRecordRepository {
    async fn save(&self, record: AuditRecord) -> AppResult<AuditId> {
        let audit_id = AuditId::new();
        let created_at: DateTime<Utc> = record.created_at();
        let document = serde_json::to_value(&record).map_err(|error| {
            AppError::Internal(format!("failed to encode audit record: {error}"))
        })?;

        sqlx::query(
            r#"
            INSERT INTO audit_records (id, owner_id, url, created_at, record)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(audit_id.as_uuid())
        .bind(record.owner_id().map(OwnerId::as_str))
        .bind(record.url().as_str())
        .bind(created_at)
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save audit record: {error}")))?;

        Ok(audit_id)
    }

    async fn find_by_id(&self, audit_id: AuditId) -> AppResult<Option<StoredAudit>> {
        let row = sqlx::query_as::<_, AuditRecordRow>(
            r#"
            SELECT id, record
            FROM audit_records
            WHERE id = $1
            "#,
        )
        .bind(audit_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find audit record '{audit_id}': {error}"))
        })?;

        row.map(StoredAudit::try_from).transpose()
    }

    async fn find_by_owner(&self, owner_id: &OwnerId) -> AppResult<Vec<StoredAudit>> {
        let rows = sqlx::query_as::<_, AuditRecordRow>(
            r#"
            SELECT id, record
            FROM audit_records
            WHERE owner_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list audit records for owner '{owner_id}': {error}"
            ))
        })?;

        rows.into_iter().map(StoredAudit::try_from).collect()
    }
}
