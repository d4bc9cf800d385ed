use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use url::Url;
use webaudit_core::{AppError, AppResult};

/// Absolute `http`/`https` address submitted for auditing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuditUrl(Url);

impl AuditUrl {
    /// Parses and validates an audit target.
    pub fn parse(value: &str) -> AppResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("url must not be empty".to_owned()));
        }

        let url = Url::parse(trimmed)
            .map_err(|error| AppError::Validation(format!("invalid url '{trimmed}': {error}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Validation(format!(
                "url '{trimmed}' must use the http or https scheme"
            )));
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(AppError::Validation(format!(
                "url '{trimmed}' must include a host"
            )));
        }

        Ok(Self(url))
    }

    /// Returns the normalized URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the parsed URL.
    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl Display for AuditUrl {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for AuditUrl {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<AuditUrl> for String {
    fn from(value: AuditUrl) -> Self {
        value.0.into()
    }
}
