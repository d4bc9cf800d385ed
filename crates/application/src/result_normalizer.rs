use std::collections::HashMap;

use webaudit_core::{AppResult, NonEmptyString};
use webaudit_domain::{AuditUrl, Category, Issue, Severity, SourceKey};

use crate::audit_ports::{AuditSource, LoadMetrics, PageFacts, RawAuditData};

mod categories;

const UNSPECIFIED_ISSUE: &str = "Unspecified issue";

/// Scores and partial metrics extracted from one raw result.
///
/// Scores are on the 0–100 scale; `None` means the provider gave nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricSet {
    /// Performance score.
    pub performance_score: Option<f64>,
    /// Accessibility score, used for the UI/UX section.
    pub accessibility_score: Option<f64>,
    /// SEO score.
    pub seo_score: Option<f64>,
    /// Page facts, when the provider reports them.
    pub page: Option<PageFacts>,
    /// Load metrics, when the provider reports them.
    pub load: Option<LoadMetrics>,
}

/// Category-partitioned issues in emission order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IssueList {
    seo: Vec<Issue>,
    performance: Vec<Issue>,
    ui_ux: Vec<Issue>,
}

impl IssueList {
    /// Appends one issue to its category list.
    pub fn push(&mut self, issue: Issue) {
        self.bucket_mut(issue.category()).push(issue);
    }

    /// Returns issues of one category.
    #[must_use]
    pub fn get(&self, category: Category) -> &[Issue] {
        match category {
            Category::Seo => &self.seo,
            Category::Performance => &self.performance,
            Category::UiUx => &self.ui_ux,
        }
    }

    /// Removes and returns issues of one category.
    pub fn take(&mut self, category: Category) -> Vec<Issue> {
        std::mem::take(self.bucket_mut(category))
    }

    /// Appends every issue of another list, keeping order.
    pub fn extend(&mut self, other: Self) {
        self.seo.extend(other.seo);
        self.performance.extend(other.performance);
        self.ui_ux.extend(other.ui_ux);
    }

    /// Returns the total issue count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seo.len() + self.performance.len() + self.ui_ux.len()
    }

    /// Returns true when no category holds an issue.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<Issue> {
        match category {
            Category::Seo => &mut self.seo,
            Category::Performance => &mut self.performance,
            Category::UiUx => &mut self.ui_ux,
        }
    }
}

/// Normalized view of one raw result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedAudit {
    /// Extracted metrics.
    pub metrics: MetricSet,
    /// Categorized issues.
    pub issues: IssueList,
}

/// Converts provider results into canonical metrics and issues.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultNormalizer;

impl ResultNormalizer {
    /// Creates a normalizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Normalizes one raw result for the audited URL.
    ///
    /// Diagnostics with a perfect score or no matching category are dropped.
    pub fn normalize(&self, raw: &RawAuditData, url: &AuditUrl) -> AppResult<NormalizedAudit> {
        let metrics = MetricSet {
            performance_score: performance_score(raw),
            accessibility_score: scale(raw.scores.accessibility),
            seo_score: scale(raw.scores.seo),
            page: raw.page.clone(),
            load: raw.load.clone(),
        };

        let mut issues = IssueList::default();
        let mut occurrences: HashMap<&str, u32> = HashMap::new();

        for diagnostic in &raw.diagnostics {
            if diagnostic.score.is_some_and(|score| score >= 1.0) {
                continue;
            }

            let check_id = diagnostic.id.trim();
            if check_id.is_empty() {
                tracing::warn!(source = %raw.source, "skipping diagnostic without check id");
                continue;
            }

            let Some(category) = categories::categorize(diagnostic) else {
                tracing::debug!(source = %raw.source, check_id, "diagnostic matches no category");
                continue;
            };

            let occurrence = occurrences.entry(check_id).or_insert(0);
            let source_key = SourceKey::new(check_id, url, *occurrence)?;
            *occurrence += 1;

            let description = [diagnostic.title.as_deref(), diagnostic.description.as_deref()]
                .into_iter()
                .flatten()
                .map(str::trim)
                .find(|value| !value.is_empty())
                .unwrap_or(UNSPECIFIED_ISSUE);

            issues.push(Issue::new(
                NonEmptyString::new(description)?,
                diagnostic.description.clone(),
                Severity::from_score(diagnostic.score),
                category,
                source_key,
            ));
        }

        tracing::debug!(
            source = %raw.source,
            seo = issues.get(Category::Seo).len(),
            performance = issues.get(Category::Performance).len(),
            ui_ux = issues.get(Category::UiUx).len(),
            "normalized audit result"
        );

        Ok(NormalizedAudit { metrics, issues })
    }
}

fn scale(score: Option<f64>) -> Option<f64> {
    score
        .filter(|value| value.is_finite())
        .map(|value| value * 100.0)
}

fn performance_score(raw: &RawAuditData) -> Option<f64> {
    match raw.source {
        AuditSource::PerfTester => raw
            .load
            .as_ref()
            .and_then(|load| load.performance_score)
            .or_else(|| scale(raw.scores.performance)),
        AuditSource::PageAuditor => scale(raw.scores.performance),
    }
}
