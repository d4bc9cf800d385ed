use serde::{Deserialize, Serialize};
use webaudit_core::{AppError, AppResult};

use crate::{Category, Issue};

/// Where a section's data came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataProvenance {
    /// Produced by a live call to the external auditor.
    Real,
    /// Substituted after the external auditor failed.
    Simulated {
        /// Human-readable explanation of the degradation.
        reason: String,
    },
}

impl DataProvenance {
    /// Creates a simulated provenance with a reason.
    #[must_use]
    pub fn simulated(reason: impl Into<String>) -> Self {
        Self::Simulated {
            reason: reason.into(),
        }
    }

    /// Returns true when the data is synthetic.
    #[must_use]
    pub fn is_simulated(&self) -> bool {
        matches!(self, Self::Simulated { .. })
    }

    /// Returns the degradation reason for simulated data.
    #[must_use]
    pub fn degradation_reason(&self) -> Option<&str> {
        match self {
            Self::Real => None,
            Self::Simulated { reason } => Some(reason.as_str()),
        }
    }

    /// Returns stable provenance value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Simulated { .. } => "simulated",
        }
    }
}

/// SEO-specific section metrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeoMetrics {
    /// Candidate keywords extracted from title and headings.
    pub keywords: Vec<String>,
    /// Meta description content, empty when absent.
    pub meta_description: String,
    /// Canonical URL declared by the page, or the audited URL.
    pub canonical_url: String,
}

/// Performance-specific section metrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Fully loaded time in seconds.
    pub load_time_seconds: f64,
    /// Transferred page weight in KiB.
    pub page_size_kb: f64,
    /// Number of requests issued while loading.
    pub requests: u32,
    /// Mobile viewport score, 0–100.
    pub mobile_optimization: f64,
    /// Letter grade reported by the performance tester.
    pub grade: Option<String>,
    /// Structure score reported by the performance tester, 0–100.
    pub structure_score: Option<f64>,
    /// Largest contentful paint in seconds.
    pub largest_contentful_paint_seconds: f64,
    /// Total blocking time in milliseconds.
    pub total_blocking_time_ms: f64,
    /// Cumulative layout shift.
    pub cumulative_layout_shift: f64,
    /// Speed index in milliseconds.
    pub speed_index_ms: f64,
    /// Link to the upstream report.
    pub report_url: Option<String>,
}

/// UI/UX-specific section metrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UiUxMetrics {
    /// Accessibility score, 0–100.
    pub accessibility: f64,
    /// Time to interactive in milliseconds.
    pub interactive_time_ms: f64,
    /// Whether content fits the viewport width.
    pub responsive_design: bool,
}

/// Category-specific metrics attached to a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum SectionMetrics {
    /// SEO metrics.
    #[serde(rename = "seo")]
    Seo(SeoMetrics),
    /// Performance metrics.
    #[serde(rename = "performance")]
    Performance(PerformanceMetrics),
    /// UI/UX metrics.
    #[serde(rename = "ui-ux")]
    UiUx(UiUxMetrics),
}

impl SectionMetrics {
    /// Returns the category these metrics belong to.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::Seo(_) => Category::Seo,
            Self::Performance(_) => Category::Performance,
            Self::UiUx(_) => Category::UiUx,
        }
    }
}

/// One category section of an audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    category: Category,
    score: f64,
    issues: Vec<Issue>,
    metrics: SectionMetrics,
    provenance: DataProvenance,
}

impl Section {
    /// Creates a validated section.
    ///
    /// Scores are clamped to `0..=100`; a non-finite score becomes 0.
    pub fn new(
        score: f64,
        issues: Vec<Issue>,
        metrics: SectionMetrics,
        provenance: DataProvenance,
    ) -> AppResult<Self> {
        let category = metrics.category();

        if let Some(foreign) = issues.iter().find(|issue| issue.category() != category) {
            return Err(AppError::Internal(format!(
                "issue '{}' of category '{}' cannot be placed in section '{}'",
                foreign.source_key(),
                foreign.category(),
                category
            )));
        }

        let score = if score.is_finite() {
            score.clamp(0.0, 100.0)
        } else {
            0.0
        };

        Ok(Self {
            category,
            score,
            issues,
            metrics,
            provenance,
        })
    }

    /// Returns section category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns section score, 0–100.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Returns issues in detection order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        self.issues.as_slice()
    }

    /// Returns category-specific metrics.
    #[must_use]
    pub fn metrics(&self) -> &SectionMetrics {
        &self.metrics
    }

    /// Returns data provenance.
    #[must_use]
    pub fn provenance(&self) -> &DataProvenance {
        &self.provenance
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use webaudit_core::NonEmptyString;

    use super::{DataProvenance, Section, SectionMetrics, SeoMetrics, UiUxMetrics};
    use crate::{AuditUrl, Category, Issue, Severity, SourceKey};

    fn issue(category: Category) -> Issue {
        let url = AuditUrl::parse("https://example.com").unwrap_or_else(|_| unreachable!());
        Issue::new(
            NonEmptyString::new("Missing alt text").unwrap_or_else(|_| unreachable!()),
            None,
            Severity::High,
            category,
            SourceKey::new("image-alt", &url, 0).unwrap_or_else(|_| unreachable!()),
        )
    }

    #[test]
    fn section_rejects_issue_from_other_category() {
        let result = Section::new(
            80.0,
            vec![issue(Category::UiUx)],
            SectionMetrics::Seo(SeoMetrics::default()),
            DataProvenance::Real,
        );
        assert!(result.is_err());
    }

    #[test]
    fn section_takes_category_from_metrics() {
        let section = Section::new(
            55.0,
            vec![issue(Category::UiUx)],
            SectionMetrics::UiUx(UiUxMetrics::default()),
            DataProvenance::simulated("page auditor timed out"),
        );
        assert!(section.is_ok());
        let section = section.unwrap_or_else(|_| unreachable!());
        assert_eq!(section.category(), Category::UiUx);
        assert_eq!(
            section.provenance().degradation_reason(),
            Some("page auditor timed out")
        );
    }

    #[test]
    fn non_finite_score_becomes_zero() {
        let section = Section::new(
            f64::NAN,
            Vec::new(),
            SectionMetrics::Seo(SeoMetrics::default()),
            DataProvenance::Real,
        )
        .unwrap_or_else(|_| unreachable!());
        assert_eq!(section.score(), 0.0);
    }

    proptest! {
        #[test]
        fn score_is_always_within_bounds(score in proptest::num::f64::ANY) {
            let section = Section::new(
                score,
                Vec::new(),
                SectionMetrics::Seo(SeoMetrics::default()),
                DataProvenance::Real,
            );
            prop_assert!(section.is_ok());
            let value = section.map(|section| section.score()).unwrap_or(-1.0);
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }
}
