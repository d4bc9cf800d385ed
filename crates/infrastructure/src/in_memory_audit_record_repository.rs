use async_trait::async_trait;
use tokio::sync::RwLock;
use webaudit_application::AuditRecordRepository;
use webaudit_core::{AppResult, OwnerId};
use webaudit_domain::{AuditId, AuditRecord, StoredAudit};

/// Process-local audit record store for development and tests.
#[derive(Default)]
pub struct InMemoryAuditRecordRepository {
    audits: RwLock<Vec<StoredAudit>>,
}

impl InMemoryAuditRecordRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditRecordRepository for InMemoryAuditRecordRepository {
    async fn save(&self, record: AuditRecord) -> AppResult<AuditId> {
        let id = AuditId::new();
        self.audits.write().await.push(StoredAudit { id, record });
        Ok(id)
    }

    async fn find_by_id(&self, audit_id: AuditId) -> AppResult<Option<StoredAudit>> {
        Ok(self
            .audits
            .read()
            .await
            .iter()
            .find(|audit| audit.id == audit_id)
            .cloned())
    }

    async fn find_by_owner(&self, owner_id: &OwnerId) -> AppResult<Vec<StoredAudit>> {
        let mut audits: Vec<StoredAudit> = self
            .audits
            .read()
            .await
            .iter()
            .filter(|audit| audit.record.owner_id() == Some(owner_id))
            .cloned()
            .collect();

        audits.sort_by(|left, right| right.record.created_at().cmp(&left.record.created_at()));
        Ok(audits)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use webaudit_application::AuditRecordRepository;
    use webaudit_core::OwnerId;
    use webaudit_domain::{
        AuditId, AuditRecord, AuditRecordInput, AuditUrl, DataProvenance, PerformanceMetrics,
        Section, SectionMetrics, SeoMetrics, UiUxMetrics,
    };

    use super::InMemoryAuditRecordRepository;

    fn record(owner: Option<&str>, age_minutes: i64) -> AuditRecord {
        let section = |metrics| {
            Section::new(50.0, Vec::new(), metrics, DataProvenance::Real)
                .unwrap_or_else(|_| unreachable!())
        };

        AuditRecord::new(AuditRecordInput {
            url: AuditUrl::parse("https://example.com").unwrap_or_else(|_| unreachable!()),
            created_at: Utc::now() - Duration::minutes(age_minutes),
            owner_id: owner.map(|value| OwnerId::new(value).unwrap_or_else(|_| unreachable!())),
            seo: section(SectionMetrics::Seo(SeoMetrics::default())),
            performance: section(SectionMetrics::Performance(PerformanceMetrics::default())),
            ui_ux: section(SectionMetrics::UiUx(UiUxMetrics::default())),
        })
        .unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn saved_records_are_found_by_id() {
        let repository = InMemoryAuditRecordRepository::new();
        let saved = repository.save(record(None, 0)).await;
        assert!(saved.is_ok());
        let id = saved.unwrap_or_else(|_| unreachable!());

        let found = repository.find_by_id(id).await.unwrap_or_default();
        assert!(found.is_some_and(|audit| audit.id == id));

        let missing = repository.find_by_id(AuditId::new()).await.unwrap_or_default();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn owner_listing_is_newest_first_and_scoped() {
        let repository = InMemoryAuditRecordRepository::new();
        let older = repository
            .save(record(Some("alice"), 30))
            .await
            .unwrap_or_else(|_| unreachable!());
        let newer = repository
            .save(record(Some("alice"), 1))
            .await
            .unwrap_or_else(|_| unreachable!());
        let _ = repository.save(record(Some("bob"), 0)).await;
        let _ = repository.save(record(None, 0)).await;

        let alice = OwnerId::new("alice").unwrap_or_else(|_| unreachable!());
        let audits = repository.find_by_owner(&alice).await.unwrap_or_default();

        let ids: Vec<AuditId> = audits.iter().map(|audit| audit.id).collect();
        assert_eq!(ids, vec![newer, older]);
    }
}
