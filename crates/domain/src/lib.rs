//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
mod issue;
mod section;
mod target_url;

pub use audit::{AuditId, AuditRecord, AuditRecordInput, StoredAudit};
pub use issue::{Category, Issue, Severity, SourceKey};
pub use section::{
    DataProvenance, PerformanceMetrics, Section, SectionMetrics, SeoMetrics, UiUxMetrics,
};
pub use target_url::AuditUrl;
