use std::fmt::Write;

use async_trait::async_trait;
use webaudit_application::{RenderedReport, ReportRenderer};
use webaudit_core::{AppError, AppResult};
use webaudit_domain::{Section, SectionMetrics, StoredAudit};

const CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Renders audits as UTF-8 plain-text documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReportRenderer;

impl TextReportRenderer {
    /// Creates a renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReportRenderer for TextReportRenderer {
    async fn render(&self, audit: &StoredAudit) -> AppResult<RenderedReport> {
        let mut document = String::new();
        write_report(&mut document, audit).map_err(|error| {
            AppError::Internal(format!("failed to render report for '{}': {error}", audit.id))
        })?;

        Ok(RenderedReport {
            content_type: CONTENT_TYPE,
            file_name: format!("audit-{}.txt", audit.id),
            bytes: document.into_bytes(),
        })
    }
}

fn write_report(out: &mut String, audit: &StoredAudit) -> std::fmt::Result {
    let record = &audit.record;

    writeln!(out, "WEB AUDIT REPORT")?;
    writeln!(out, "================")?;
    writeln!(out, "URL:     {}", record.url())?;
    writeln!(
        out,
        "Date:    {}",
        record.created_at().format("%Y-%m-%d %H:%M UTC")
    )?;
    writeln!(out, "Audit:   {}", audit.id)?;
    writeln!(out)?;

    writeln!(out, "OVERVIEW")?;
    writeln!(out, "  Overall      {:>5.1}", record.overall_score())?;
    writeln!(out, "  SEO          {:>5.1}", record.seo().score())?;
    writeln!(out, "  Performance  {:>5.1}", record.performance().score())?;
    writeln!(out, "  UI/UX        {:>5.1}", record.ui_ux().score())?;

    if record.is_degraded() {
        writeln!(out)?;
        writeln!(
            out,
            "NOTICE: some sections contain simulated data and are not based on a live measurement."
        )?;
    }

    for section in record.sections() {
        writeln!(out)?;
        write_section(out, section)?;
    }

    Ok(())
}

fn write_section(out: &mut String, section: &Section) -> std::fmt::Result {
    let title = match section.metrics() {
        SectionMetrics::Seo(_) => "SEO",
        SectionMetrics::Performance(_) => "PERFORMANCE",
        SectionMetrics::UiUx(_) => "UI/UX",
    };
    writeln!(out, "{title} ({:.1}/100)", section.score())?;
    writeln!(out, "{}", "-".repeat(title.len() + 11))?;

    if let Some(reason) = section.provenance().degradation_reason() {
        writeln!(out, "Simulated data: {reason}")?;
    }

    match section.metrics() {
        SectionMetrics::Seo(metrics) => {
            let keywords = if metrics.keywords.is_empty() {
                "none".to_owned()
            } else {
                metrics.keywords.join(", ")
            };
            writeln!(out, "  Keywords:          {keywords}")?;
            writeln!(
                out,
                "  Meta description:  {}",
                or_missing(metrics.meta_description.as_str())
            )?;
            writeln!(
                out,
                "  Canonical URL:     {}",
                or_missing(metrics.canonical_url.as_str())
            )?;
        }
        SectionMetrics::Performance(metrics) => {
            writeln!(out, "  Load time:         {:.2} s", metrics.load_time_seconds)?;
            writeln!(out, "  Page size:         {:.1} KB", metrics.page_size_kb)?;
            writeln!(out, "  Requests:          {}", metrics.requests)?;
            writeln!(
                out,
                "  Mobile:            {:.0}/100",
                metrics.mobile_optimization
            )?;
            if let Some(grade) = metrics.grade.as_deref() {
                writeln!(out, "  Grade:             {grade}")?;
            }
            if let Some(structure) = metrics.structure_score {
                writeln!(out, "  Structure:         {structure:.0}/100")?;
            }
            writeln!(
                out,
                "  LCP:               {:.2} s",
                metrics.largest_contentful_paint_seconds
            )?;
            writeln!(
                out,
                "  TBT:               {:.0} ms",
                metrics.total_blocking_time_ms
            )?;
            writeln!(
                out,
                "  CLS:               {:.3}",
                metrics.cumulative_layout_shift
            )?;
            writeln!(out, "  Speed index:       {:.0} ms", metrics.speed_index_ms)?;
            if let Some(report_url) = metrics.report_url.as_deref() {
                writeln!(out, "  Full report:       {report_url}")?;
            }
        }
        SectionMetrics::UiUx(metrics) => {
            writeln!(out, "  Accessibility:     {:.0}/100", metrics.accessibility)?;
            writeln!(
                out,
                "  Interactive:       {:.0} ms",
                metrics.interactive_time_ms
            )?;
            writeln!(
                out,
                "  Responsive:        {}",
                if metrics.responsive_design { "yes" } else { "no" }
            )?;
        }
    }

    if section.issues().is_empty() {
        writeln!(out, "  No issues found.")?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "  Issues ({}):", section.issues().len())?;
    for issue in section.issues() {
        writeln!(
            out,
            "  - [{}] {}",
            issue.severity().as_str().to_uppercase(),
            issue.description()
        )?;
        if let Some(recommendation) = issue.recommendation() {
            writeln!(out, "    Recommendation: {recommendation}")?;
        }
    }

    Ok(())
}

fn or_missing(value: &str) -> &str {
    if value.trim().is_empty() {
        "missing"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use webaudit_application::ReportRenderer;
    use webaudit_core::NonEmptyString;
    use webaudit_domain::{
        AuditId, AuditRecord, AuditRecordInput, AuditUrl, Category, DataProvenance, Issue,
        PerformanceMetrics, Section, SectionMetrics, SeoMetrics, Severity, SourceKey, StoredAudit,
        UiUxMetrics,
    };

    use super::TextReportRenderer;

    fn stored_audit(performance_provenance: DataProvenance) -> StoredAudit {
        let url = AuditUrl::parse("https://example.com").unwrap_or_else(|_| unreachable!());
        let issue = Issue::new(
            NonEmptyString::new("Document does not have a meta description")
                .unwrap_or_else(|_| unreachable!()),
            None,
            Severity::High,
            Category::Seo,
            SourceKey::new("meta-description", &url, 0).unwrap_or_else(|_| unreachable!()),
        )
        .with_recommendation("Write a 150 character summary of the page.");

        let record = AuditRecord::new(AuditRecordInput {
            url: url.clone(),
            created_at: Utc
                .with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
                .single()
                .unwrap_or_else(|| unreachable!()),
            owner_id: None,
            seo: Section::new(
                80.0,
                vec![issue],
                SectionMetrics::Seo(SeoMetrics {
                    keywords: vec!["coffee".to_owned(), "beans".to_owned()],
                    meta_description: String::new(),
                    canonical_url: url.as_str().to_owned(),
                }),
                DataProvenance::Real,
            )
            .unwrap_or_else(|_| unreachable!()),
            performance: Section::new(
                40.0,
                Vec::new(),
                SectionMetrics::Performance(PerformanceMetrics {
                    grade: Some("C".to_owned()),
                    structure_score: Some(78.0),
                    ..PerformanceMetrics::default()
                }),
                performance_provenance,
            )
            .unwrap_or_else(|_| unreachable!()),
            ui_ux: Section::new(
                90.0,
                Vec::new(),
                SectionMetrics::UiUx(UiUxMetrics {
                    accessibility: 90.0,
                    interactive_time_ms: 2100.0,
                    responsive_design: true,
                }),
                DataProvenance::Real,
            )
            .unwrap_or_else(|_| unreachable!()),
        })
        .unwrap_or_else(|_| unreachable!());

        StoredAudit {
            id: AuditId::new(),
            record,
        }
    }

    #[tokio::test]
    async fn report_lists_scores_metrics_and_recommendations() {
        let audit = stored_audit(DataProvenance::Real);
        let rendered = TextReportRenderer::new().render(&audit).await;
        assert!(rendered.is_ok());
        let rendered = rendered.unwrap_or_else(|_| unreachable!());

        assert_eq!(rendered.content_type, "text/plain; charset=utf-8");
        assert_eq!(rendered.file_name, format!("audit-{}.txt", audit.id));

        let text = String::from_utf8(rendered.bytes).unwrap_or_default();
        assert!(text.contains("URL:     https://example.com/"));
        assert!(text.contains("Date:    2026-03-14 09:30 UTC"));
        assert!(text.contains("Overall       70.0"));
        assert!(text.contains("Keywords:          coffee, beans"));
        assert!(text.contains("Meta description:  missing"));
        assert!(text.contains("Grade:             C"));
        assert!(text.contains("Structure:         78/100"));
        assert!(text.contains("Responsive:        yes"));
        assert!(text.contains("- [HIGH] Document does not have a meta description"));
        assert!(text.contains("Recommendation: Write a 150 character summary of the page."));
        assert!(!text.contains("NOTICE"));
    }

    #[tokio::test]
    async fn simulated_sections_carry_a_notice() {
        let audit = stored_audit(DataProvenance::simulated("performance tester timed out"));
        let rendered = TextReportRenderer::new()
            .render(&audit)
            .await
            .unwrap_or_else(|_| unreachable!());

        let text = String::from_utf8(rendered.bytes).unwrap_or_default();
        assert!(text.contains("NOTICE: some sections contain simulated data"));
        assert!(text.contains("Simulated data: performance tester timed out"));
    }
}
