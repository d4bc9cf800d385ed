use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct PageSpeedResponse {
    #[serde(rename = "lighthouseResult")]
    pub lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LighthouseResult {
    #[serde(default)]
    pub categories: LighthouseCategories,
    #[serde(default)]
    pub audits: BTreeMap<String, LighthouseAudit>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LighthouseCategories {
    pub performance: Option<LighthouseCategory>,
    pub accessibility: Option<LighthouseCategory>,
    pub seo: Option<LighthouseCategory>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LighthouseCategory {
    pub score: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LighthouseAudit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub score: Option<f64>,
    #[serde(rename = "scoreDisplayMode")]
    pub score_display_mode: Option<String>,
    #[serde(rename = "numericValue")]
    pub numeric_value: Option<f64>,
    pub details: Option<LighthouseDetails>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LighthouseDetails {
    #[serde(default)]
    pub items: Vec<Value>,
}

impl LighthouseResult {
    pub fn audit(&self, id: &str) -> Option<&LighthouseAudit> {
        self.audits.get(id)
    }
}

impl LighthouseAudit {
    /// Returns a string field of every detail item that carries it.
    pub fn item_strings<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.details
            .iter()
            .flat_map(|details| details.items.iter())
            .filter_map(move |item| item.get(field).and_then(Value::as_str))
    }

    /// Returns true for audits Lighthouse never scores.
    pub fn is_unscored(&self) -> bool {
        self.score.is_none()
            && matches!(
                self.score_display_mode.as_deref(),
                Some("notApplicable" | "manual" | "informative")
            )
    }
}
