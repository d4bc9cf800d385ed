use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use thiserror::Error;
use webaudit_domain::AuditUrl;

use super::{AuditSource, RawAuditData};

/// Failure classes of one external audit call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditErrorKind {
    /// Network timeout or exceeded polling budget.
    Timeout,
    /// Upstream answered with a rate-limit response.
    RateLimited,
    /// Account credits or quota are exhausted.
    QuotaExceeded,
    /// Any other non-success response or undecodable payload.
    UpstreamError,
}

impl AuditErrorKind {
    /// Returns stable kind value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::RateLimited => "rate_limited",
            Self::QuotaExceeded => "quota_exceeded",
            Self::UpstreamError => "upstream_error",
        }
    }

    /// Returns the user-facing degradation reason for this kind.
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::Timeout => "the analysis took too long and timed out",
            Self::RateLimited => "too many requests were sent to the service, try again in a few minutes",
            Self::QuotaExceeded => "the service account has no credits left",
            Self::UpstreamError => "the service returned an unexpected response",
        }
    }
}

impl Display for AuditErrorKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error returned by an external audit client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct AuditError {
    /// Failure class.
    pub kind: AuditErrorKind,
    /// Diagnostic message for logs.
    pub message: String,
}

impl AuditError {
    /// Creates an audit error.
    #[must_use]
    pub fn new(kind: AuditErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(AuditErrorKind::Timeout, message)
    }

    /// Creates an upstream error.
    #[must_use]
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(AuditErrorKind::UpstreamError, message)
    }
}

/// Port for one external web auditing provider.
#[async_trait]
pub trait ExternalAuditClient: Send + Sync {
    /// Identifies which provider this client wraps.
    fn source(&self) -> AuditSource;

    /// Runs one analysis of an already validated URL.
    async fn run_audit(&self, url: &AuditUrl) -> Result<RawAuditData, AuditError>;
}
