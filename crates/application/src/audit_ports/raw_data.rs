use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use webaudit_domain::DataProvenance;

/// External provider that produced a raw result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSource {
    /// Page-speed / accessibility auditor.
    PageAuditor,
    /// Third-party performance testing service.
    PerfTester,
}

impl AuditSource {
    /// Returns stable source value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PageAuditor => "page_auditor",
            Self::PerfTester => "perf_tester",
        }
    }

    /// Returns a human-readable provider label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PageAuditor => "page auditor",
            Self::PerfTester => "performance tester",
        }
    }
}

impl Display for AuditSource {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Category scores in `[0, 1]` as reported upstream.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryScores {
    /// Performance category score.
    pub performance: Option<f64>,
    /// Accessibility category score.
    pub accessibility: Option<f64>,
    /// SEO category score.
    pub seo: Option<f64>,
}

/// One upstream diagnostic entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDiagnostic {
    /// Upstream check identifier.
    pub id: String,
    /// Short title.
    pub title: Option<String>,
    /// Longer explanation.
    pub description: Option<String>,
    /// Sub-score in `[0, 1]`; absent when upstream gave none.
    pub score: Option<f64>,
}

/// Page-level facts extracted by the page auditor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageFacts {
    /// Candidate keywords in first-seen order.
    pub keywords: Vec<String>,
    /// Meta description content.
    pub meta_description: Option<String>,
    /// Declared canonical URL.
    pub canonical_url: Option<String>,
    /// Time to interactive in milliseconds.
    pub interactive_time_ms: Option<f64>,
    /// Viewport check score in `[0, 1]`.
    pub viewport_score: Option<f64>,
    /// Whether content width matched the viewport.
    pub content_width_passed: Option<bool>,
}

/// Load metrics reported by the performance tester.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadMetrics {
    /// Fully loaded time in seconds.
    pub load_time_seconds: Option<f64>,
    /// Page weight in KiB.
    pub page_size_kb: Option<f64>,
    /// Request count.
    pub requests: Option<u32>,
    /// Letter grade.
    pub grade: Option<String>,
    /// Performance score, 0–100.
    pub performance_score: Option<f64>,
    /// Structure score, 0–100.
    pub structure_score: Option<f64>,
    /// Largest contentful paint in seconds.
    pub largest_contentful_paint_seconds: Option<f64>,
    /// Total blocking time in milliseconds.
    pub total_blocking_time_ms: Option<f64>,
    /// Cumulative layout shift.
    pub cumulative_layout_shift: Option<f64>,
    /// Speed index in milliseconds.
    pub speed_index_ms: Option<f64>,
    /// Link to the upstream report.
    pub report_url: Option<String>,
}

/// Typed, partial result of one external audit.
///
/// Decoded once at the client boundary; every field the provider may omit is
/// optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAuditData {
    /// Producing provider.
    pub source: AuditSource,
    /// Real or synthetic marker.
    pub provenance: DataProvenance,
    /// Category scores.
    pub scores: CategoryScores,
    /// Diagnostics in upstream order.
    pub diagnostics: Vec<RawDiagnostic>,
    /// Page facts, page auditor only.
    pub page: Option<PageFacts>,
    /// Load metrics, performance tester only.
    pub load: Option<LoadMetrics>,
}

impl RawAuditData {
    /// Creates an empty real result for a provider.
    #[must_use]
    pub fn real(source: AuditSource) -> Self {
        Self {
            source,
            provenance: DataProvenance::Real,
            scores: CategoryScores::default(),
            diagnostics: Vec::new(),
            page: None,
            load: None,
        }
    }

    /// Creates the synthetic stand-in used after a provider failure.
    ///
    /// All scores are absent and there are no diagnostics.
    #[must_use]
    pub fn synthetic(source: AuditSource, reason: impl Into<String>) -> Self {
        Self {
            provenance: DataProvenance::simulated(reason),
            ..Self::real(source)
        }
    }

    /// Returns true for synthetic data.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.provenance.is_simulated()
    }
}
