use async_trait::async_trait;
use webaudit_application::{
    AuditError, AuditSource, CategoryScores, ExternalAuditClient, PageFacts, RawAuditData,
    RawDiagnostic,
};
use webaudit_domain::AuditUrl;

use crate::http_status::{classify_status, classify_transport};

mod response;

use response::{LighthouseResult, PageSpeedResponse};

const PROVIDER: &str = "page auditor";
const CATEGORIES: [&str; 4] = ["performance", "accessibility", "best-practices", "seo"];

/// Page auditor backed by a PageSpeed Insights compatible API.
#[derive(Clone)]
pub struct PageSpeedAuditClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl PageSpeedAuditClient {
    /// Creates a client for the given API base URL.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key,
        }
    }
}

#[async_trait]
impl ExternalAuditClient for PageSpeedAuditClient {
    fn source(&self) -> AuditSource {
        AuditSource::PageAuditor
    }

    async fn run_audit(&self, url: &AuditUrl) -> Result<RawAuditData, AuditError> {
        let mut query: Vec<(&str, &str)> = vec![("url", url.as_str()), ("strategy", "mobile")];
        query.extend(CATEGORIES.iter().map(|category| ("category", *category)));
        if let Some(api_key) = self.api_key.as_deref() {
            query.push(("key", api_key));
        }

        tracing::info!(url = %url, "requesting page audit");

        let response = self
            .http_client
            .get(format!("{}/runPagespeed", self.base_url))
            .query(&query)
            .send()
            .await
            .map_err(|error| classify_transport(PROVIDER, &error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(PROVIDER, status, body.as_str()));
        }

        let payload = response
            .json::<PageSpeedResponse>()
            .await
            .map_err(|error| classify_transport(PROVIDER, &error))?;

        interpret_response(payload)
    }
}

fn interpret_response(response: PageSpeedResponse) -> Result<RawAuditData, AuditError> {
    let Some(result) = response.lighthouse_result else {
        return Err(AuditError::upstream("response has no lighthouse result"));
    };

    let categories = &result.categories;
    if categories.performance.is_none()
        || categories.accessibility.is_none()
        || categories.seo.is_none()
    {
        return Err(AuditError::upstream(
            "lighthouse result is missing performance, accessibility or seo",
        ));
    }

    let scores = CategoryScores {
        performance: categories.performance.as_ref().and_then(|entry| entry.score),
        accessibility: categories.accessibility.as_ref().and_then(|entry| entry.score),
        seo: categories.seo.as_ref().and_then(|entry| entry.score),
    };

    let diagnostics = result
        .audits
        .iter()
        .filter(|(_, audit)| !audit.is_unscored())
        .map(|(id, audit)| RawDiagnostic {
            id: id.clone(),
            title: audit.title.clone(),
            description: audit.description.clone(),
            score: audit.score,
        })
        .collect();

    Ok(RawAuditData {
        scores,
        diagnostics,
        page: Some(page_facts(&result)),
        ..RawAuditData::real(AuditSource::PageAuditor)
    })
}

fn page_facts(result: &LighthouseResult) -> PageFacts {
    let mut keywords: Vec<String> = Vec::new();
    let title = result
        .audit("document-title")
        .and_then(|entry| entry.item_strings("content").next());
    let headings = result
        .audit("heading-levels")
        .into_iter()
        .flat_map(|entry| entry.item_strings("content"));

    for text in title.into_iter().chain(headings) {
        for word in text.split(' ').filter(|word| word.chars().count() > 3) {
            if !keywords.iter().any(|known| known == word) {
                keywords.push(word.to_owned());
            }
        }
    }

    PageFacts {
        keywords,
        meta_description: result
            .audit("meta-description")
            .and_then(|entry| entry.item_strings("content").next())
            .map(str::to_owned),
        canonical_url: result
            .audit("canonical")
            .and_then(|entry| entry.item_strings("url").next())
            .map(str::to_owned),
        interactive_time_ms: result
            .audit("interactive")
            .and_then(|entry| entry.numeric_value),
        viewport_score: result.audit("viewport").and_then(|entry| entry.score),
        content_width_passed: result
            .audit("content-width")
            .map(|entry| entry.score.is_some_and(|score| score >= 1.0)),
    }
}
