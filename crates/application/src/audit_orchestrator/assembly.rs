use chrono::{DateTime, Utc};
use webaudit_core::{AppResult, OwnerId};
use webaudit_domain::{
    AuditRecord, AuditRecordInput, AuditUrl, DataProvenance, Issue, PerformanceMetrics, Section,
    SectionMetrics, SeoMetrics, UiUxMetrics,
};

use crate::result_normalizer::MetricSet;

pub(super) struct SourceOutcome {
    pub provenance: DataProvenance,
    pub metrics: MetricSet,
}

pub(super) struct AssemblyInput {
    pub url: AuditUrl,
    pub owner_id: Option<OwnerId>,
    pub created_at: DateTime<Utc>,
    pub page: SourceOutcome,
    pub perf: SourceOutcome,
    pub seo_issues: Vec<Issue>,
    pub performance_issues: Vec<Issue>,
    pub ui_ux_issues: Vec<Issue>,
}

/// Builds the record from both provider outcomes.
///
/// SEO and UI/UX come from the page auditor. Performance scores and load
/// metrics come from the performance tester, mobile optimization from the
/// page auditor.
pub(super) fn assemble(input: AssemblyInput) -> AppResult<AuditRecord> {
    let AssemblyInput {
        url,
        owner_id,
        created_at,
        page,
        perf,
        seo_issues,
        performance_issues,
        ui_ux_issues,
    } = input;

    let facts = page.metrics.page.clone().unwrap_or_default();
    let load = perf.metrics.load.clone().unwrap_or_default();
    let accessibility = page.metrics.accessibility_score.unwrap_or(0.0);

    let seo = Section::new(
        page.metrics.seo_score.unwrap_or(0.0),
        seo_issues,
        SectionMetrics::Seo(SeoMetrics {
            keywords: facts.keywords,
            meta_description: facts.meta_description.unwrap_or_default(),
            canonical_url: facts
                .canonical_url
                .unwrap_or_else(|| url.as_str().to_owned()),
        }),
        page.provenance.clone(),
    )?;

    let performance = Section::new(
        perf.metrics.performance_score.unwrap_or(0.0),
        performance_issues,
        SectionMetrics::Performance(PerformanceMetrics {
            load_time_seconds: load.load_time_seconds.unwrap_or(0.0),
            page_size_kb: load.page_size_kb.unwrap_or(0.0),
            requests: load.requests.unwrap_or(0),
            mobile_optimization: facts.viewport_score.map_or(0.0, |score| score * 100.0),
            grade: load.grade,
            structure_score: load.structure_score,
            largest_contentful_paint_seconds: load
                .largest_contentful_paint_seconds
                .unwrap_or(0.0),
            total_blocking_time_ms: load.total_blocking_time_ms.unwrap_or(0.0),
            cumulative_layout_shift: load.cumulative_layout_shift.unwrap_or(0.0),
            speed_index_ms: load.speed_index_ms.unwrap_or(0.0),
            report_url: load.report_url,
        }),
        perf.provenance,
    )?;

    let ui_ux = Section::new(
        accessibility,
        ui_ux_issues,
        SectionMetrics::UiUx(UiUxMetrics {
            accessibility,
            interactive_time_ms: facts.interactive_time_ms.unwrap_or(0.0),
            responsive_design: facts.content_width_passed.unwrap_or(false),
        }),
        page.provenance,
    )?;

    AuditRecord::new(AuditRecordInput {
        url,
        created_at,
        owner_id,
        seo,
        performance,
        ui_ux,
    })
}
