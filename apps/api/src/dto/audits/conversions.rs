use chrono::SecondsFormat;
use webaudit_domain::{Issue, Section, SectionMetrics, StoredAudit};

use super::{AuditRecordResponse, IssueResponse, SectionMetricsResponse, SectionResponse};

impl From<StoredAudit> for AuditRecordResponse {
    fn from(audit: StoredAudit) -> Self {
        let record = &audit.record;

        Self {
            id: audit.id.to_string(),
            url: record.url().to_string(),
            created_at: record
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            owner_id: record.owner_id().map(|owner_id| owner_id.as_str().to_owned()),
            overall_score: record.overall_score(),
            degraded: record.is_degraded(),
            seo: SectionResponse::from(record.seo()),
            performance: SectionResponse::from(record.performance()),
            ui_ux: SectionResponse::from(record.ui_ux()),
        }
    }
}

impl From<&Section> for SectionResponse {
    fn from(section: &Section) -> Self {
        Self {
            category: section.category().as_str().to_owned(),
            score: section.score(),
            provenance: section.provenance().as_str().to_owned(),
            degradation_reason: section
                .provenance()
                .degradation_reason()
                .map(ToOwned::to_owned),
            metrics: SectionMetricsResponse::from(section.metrics()),
            issues: section.issues().iter().map(IssueResponse::from).collect(),
        }
    }
}

impl From<&SectionMetrics> for SectionMetricsResponse {
    fn from(metrics: &SectionMetrics) -> Self {
        match metrics {
            SectionMetrics::Seo(metrics) => Self::Seo {
                keywords: metrics.keywords.clone(),
                meta_description: metrics.meta_description.clone(),
                canonical_url: metrics.canonical_url.clone(),
            },
            SectionMetrics::Performance(metrics) => Self::Performance {
                load_time_seconds: metrics.load_time_seconds,
                page_size_kb: metrics.page_size_kb,
                requests: metrics.requests,
                mobile_optimization: metrics.mobile_optimization,
                grade: metrics.grade.clone(),
                structure_score: metrics.structure_score,
                largest_contentful_paint_seconds: metrics.largest_contentful_paint_seconds,
                total_blocking_time_ms: metrics.total_blocking_time_ms,
                cumulative_layout_shift: metrics.cumulative_layout_shift,
                speed_index_ms: metrics.speed_index_ms,
                report_url: metrics.report_url.clone(),
            },
            SectionMetrics::UiUx(metrics) => Self::UiUx {
                accessibility: metrics.accessibility,
                interactive_time_ms: metrics.interactive_time_ms,
                responsive_design: metrics.responsive_design,
            },
        }
    }
}

impl From<&Issue> for IssueResponse {
    fn from(issue: &Issue) -> Self {
        Self {
            source_key: issue.source_key().to_string(),
            description: issue.description().to_owned(),
            details: issue.details().map(ToOwned::to_owned),
            severity: issue.severity().as_str().to_owned(),
            recommendation: issue.recommendation().unwrap_or_default().to_owned(),
        }
    }
}
