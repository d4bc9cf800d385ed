use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use webaudit_core::{AppError, AppResult, OwnerId};

use crate::{AuditUrl, Category, Section};

/// Identifier assigned to an audit record when it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditId(Uuid);

impl AuditId {
    /// Creates a random audit identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an audit identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses an audit identifier from its string form.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid audit id '{value}': {error}")))
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AuditId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for AuditId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Input used to construct a validated audit record.
#[derive(Debug, Clone)]
pub struct AuditRecordInput {
    /// Audited address.
    pub url: AuditUrl,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional owning user.
    pub owner_id: Option<OwnerId>,
    /// SEO section.
    pub seo: Section,
    /// Performance section.
    pub performance: Section,
    /// UI/UX section.
    pub ui_ux: Section,
}

/// Root aggregate of one audit run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    url: AuditUrl,
    created_at: DateTime<Utc>,
    owner_id: Option<OwnerId>,
    seo: Section,
    performance: Section,
    ui_ux: Section,
}

impl AuditRecord {
    /// Creates a validated audit record.
    ///
    /// Every section must sit in its own slot and every issue must carry a
    /// non-blank recommendation.
    pub fn new(input: AuditRecordInput) -> AppResult<Self> {
        let AuditRecordInput {
            url,
            created_at,
            owner_id,
            seo,
            performance,
            ui_ux,
        } = input;

        for (expected, section) in [
            (Category::Seo, &seo),
            (Category::Performance, &performance),
            (Category::UiUx, &ui_ux),
        ] {
            if section.category() != expected {
                return Err(AppError::Internal(format!(
                    "section '{}' was placed in the '{}' slot",
                    section.category(),
                    expected
                )));
            }

            if let Some(issue) = section.issues().iter().find(|issue| {
                issue
                    .recommendation()
                    .is_none_or(|recommendation| recommendation.trim().is_empty())
            }) {
                return Err(AppError::Internal(format!(
                    "issue '{}' in section '{}' has no recommendation",
                    issue.source_key(),
                    expected
                )));
            }
        }

        Ok(Self {
            url,
            created_at,
            owner_id,
            seo,
            performance,
            ui_ux,
        })
    }

    /// Returns the audited address.
    #[must_use]
    pub fn url(&self) -> &AuditUrl {
        &self.url
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the owning user, if the audit was not anonymous.
    #[must_use]
    pub fn owner_id(&self) -> Option<&OwnerId> {
        self.owner_id.as_ref()
    }

    /// Returns the SEO section.
    #[must_use]
    pub fn seo(&self) -> &Section {
        &self.seo
    }

    /// Returns the performance section.
    #[must_use]
    pub fn performance(&self) -> &Section {
        &self.performance
    }

    /// Returns the UI/UX section.
    #[must_use]
    pub fn ui_ux(&self) -> &Section {
        &self.ui_ux
    }

    /// Returns the three sections in display order.
    #[must_use]
    pub fn sections(&self) -> [&Section; 3] {
        [&self.seo, &self.performance, &self.ui_ux]
    }

    /// Unweighted mean of the three section scores.
    ///
    /// Derived for presentation; never stored.
    #[must_use]
    pub fn overall_score(&self) -> f64 {
        (self.seo.score() + self.performance.score() + self.ui_ux.score()) / 3.0
    }

    /// Returns true when any section carries simulated data.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.sections()
            .iter()
            .any(|section| section.provenance().is_simulated())
    }
}

/// Audit record together with its persisted identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAudit {
    /// Persisted identifier.
    pub id: AuditId,
    /// Stored record.
    pub record: AuditRecord,
}
