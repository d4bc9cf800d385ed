use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use webaudit_core::{AppError, AppResult, NonEmptyString};

use crate::AuditUrl;

/// Audit category used to partition sections and issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Search engine optimization.
    #[serde(rename = "seo")]
    Seo,
    /// Loading and runtime performance.
    #[serde(rename = "performance")]
    Performance,
    /// User interface, user experience and accessibility.
    #[serde(rename = "ui-ux")]
    UiUx,
}

impl Category {
    /// All categories in section order.
    pub const ALL: [Self; 3] = [Self::Seo, Self::Performance, Self::UiUx];

    /// Returns stable category value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seo => "seo",
            Self::Performance => "performance",
            Self::UiUx => "ui-ux",
        }
    }

    /// Parses a stable category value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "seo" => Ok(Self::Seo),
            "performance" => Ok(Self::Performance),
            "ui-ux" => Ok(Self::UiUx),
            _ => Err(AppError::Validation(format!("unknown category '{value}'"))),
        }
    }
}

impl Display for Category {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocking problem, sub-score below 0.5.
    High,
    /// Noticeable problem, sub-score below 0.9 or unknown.
    #[default]
    Medium,
    /// Minor problem.
    Low,
}

impl Severity {
    /// Maps an upstream sub-score in `[0, 1]` to a severity.
    ///
    /// A missing sub-score yields [`Severity::Medium`].
    #[must_use]
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            None => Self::Medium,
            Some(score) if score < 0.5 => Self::High,
            Some(score) if score < 0.9 => Self::Medium,
            Some(_) => Self::Low,
        }
    }

    /// Returns stable severity value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Stable per-issue identifier built from the upstream check and the audited URL.
///
/// The occurrence discriminator separates repeated reports of the same check
/// within one raw result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceKey {
    check_id: String,
    url: String,
    occurrence: u32,
}

impl SourceKey {
    /// Creates a source key for one diagnostic occurrence.
    pub fn new(check_id: &str, url: &AuditUrl, occurrence: u32) -> AppResult<Self> {
        let check_id = check_id.trim();
        if check_id.is_empty() {
            return Err(AppError::Validation(
                "source key check id must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            check_id: check_id.to_owned(),
            url: url.as_str().to_owned(),
            occurrence,
        })
    }

    /// Returns the upstream check identifier.
    #[must_use]
    pub fn check_id(&self) -> &str {
        self.check_id.as_str()
    }

    /// Returns the audited URL.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns the zero-based occurrence discriminator.
    #[must_use]
    pub fn occurrence(&self) -> u32 {
        self.occurrence
    }
}

impl Display for SourceKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}|{}#{}",
            self.check_id, self.url, self.occurrence
        )
    }
}

/// One detected problem within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    description: NonEmptyString,
    details: Option<String>,
    severity: Severity,
    category: Category,
    source_key: SourceKey,
    recommendation: Option<String>,
}

impl Issue {
    /// Creates an issue without a recommendation.
    #[must_use]
    pub fn new(
        description: NonEmptyString,
        details: Option<String>,
        severity: Severity,
        category: Category,
        source_key: SourceKey,
    ) -> Self {
        let details = details.and_then(|value| {
            let trimmed = value.trim().to_owned();
            (!trimmed.is_empty()).then_some(trimmed)
        });

        Self {
            description,
            details,
            severity,
            category,
            source_key,
            recommendation: None,
        }
    }

    /// Returns a copy carrying the given recommendation.
    #[must_use]
    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    /// Returns the human-readable finding.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns upstream explanation text, if any.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns issue severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns issue category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the stable source key.
    #[must_use]
    pub fn source_key(&self) -> &SourceKey {
        &self.source_key
    }

    /// Returns the recommendation, once assigned.
    #[must_use]
    pub fn recommendation(&self) -> Option<&str> {
        self.recommendation.as_deref()
    }
}
