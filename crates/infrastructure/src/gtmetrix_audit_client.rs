use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use webaudit_application::{
    AuditError, AuditSource, ExternalAuditClient, LoadMetrics, RawAuditData,
};
use webaudit_core::{AppError, AppResult};
use webaudit_domain::AuditUrl;

use crate::http_status::{classify_status, classify_transport, mask_secret};

mod response;

use response::{ReportResponse, StartTestResponse, TestStateResponse};

const PROVIDER: &str = "performance tester";
const JSON_API: &str = "application/vnd.api+json";
const REPORT_PAGE_BASE_URL: &str = "https://gtmetrix.com/reports";

/// Settings of the GTmetrix compatible performance tester.
#[derive(Debug, Clone)]
pub struct GtmetrixConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// API key used as basic-auth user name.
    pub api_key: String,
    /// Wait between two state polls.
    pub poll_interval: Duration,
    /// Maximum number of state polls.
    pub max_polls: u32,
    /// Timeout of each single HTTP request.
    pub request_timeout: Duration,
}

impl GtmetrixConfig {
    /// Creates settings with the default polling budget.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            poll_interval: Duration::from_secs(15),
            max_polls: 20,
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Outcome of one state poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PollOutcome {
    Pending,
    Completed(String),
    Retry(String),
    Failed(AuditError),
}

/// Performance tester using the start/poll/fetch protocol.
#[derive(Clone)]
pub struct GtmetrixAuditClient {
    http_client: reqwest::Client,
    config: GtmetrixConfig,
}

impl GtmetrixAuditClient {
    /// Creates a client. Redirects are never followed so report redirects
    /// can be detected while polling.
    pub fn new(config: GtmetrixConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(config.request_timeout)
            .build()
            .map_err(|error| {
                AppError::Internal(format!("failed to build performance tester client: {error}"))
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    async fn start_test(&self, url: &AuditUrl) -> Result<String, AuditError> {
        let body = serde_json::json!({
            "data": {
                "type": "test",
                "attributes": { "url": url.as_str(), "report": "lighthouse" }
            }
        });

        tracing::info!(
            url = %url,
            api_key = %mask_secret(self.config.api_key.as_str()),
            "starting performance test"
        );

        let response = self
            .http_client
            .post(format!("{}/tests", self.config.base_url))
            .basic_auth(self.config.api_key.as_str(), Some(""))
            .header(CONTENT_TYPE, JSON_API)
            .body(body.to_string())
            .send()
            .await
            .map_err(|error| classify_transport(PROVIDER, &error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(PROVIDER, status, body.as_str()));
        }

        let started = response
            .json::<StartTestResponse>()
            .await
            .map_err(|error| classify_transport(PROVIDER, &error))?;

        tracing::info!(
            test_id = %started.data.id,
            credits_left = ?started.meta.and_then(|meta| meta.credits_left),
            "performance test started"
        );

        Ok(started.data.id)
    }

    async fn wait_for_report(&self, test_id: &str) -> Result<String, AuditError> {
        let max_polls = self.config.max_polls.max(1);

        for attempt in 1..=max_polls {
            let outcome = match self
                .http_client
                .get(format!("{}/tests/{test_id}", self.config.base_url))
                .basic_auth(self.config.api_key.as_str(), Some(""))
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    let location = response
                        .headers()
                        .get(LOCATION)
                        .and_then(|value| value.to_str().ok())
                        .map(str::to_owned);
                    let body = response.text().await.unwrap_or_default();
                    interpret_poll(status, location.as_deref(), body.as_str())
                }
                Err(error) if error.is_timeout() || error.is_connect() => {
                    PollOutcome::Retry(format!("transient transport error: {error}"))
                }
                Err(error) => PollOutcome::Failed(classify_transport(PROVIDER, &error)),
            };

            match outcome {
                PollOutcome::Completed(report_id) => {
                    tracing::info!(test_id, report_id = %report_id, attempt, "performance test completed");
                    return Ok(report_id);
                }
                PollOutcome::Failed(error) => return Err(error),
                PollOutcome::Pending => {
                    tracing::debug!(test_id, attempt, max_polls, "performance test pending");
                }
                PollOutcome::Retry(reason) => {
                    tracing::warn!(test_id, attempt, max_polls, reason = %reason, "performance test poll failed");
                }
            }

            if attempt < max_polls {
                tokio::time::sleep(self.config.poll_interval).await;
            }
        }

        Err(AuditError::timeout(format!(
            "performance test {test_id} did not complete after {max_polls} polls"
        )))
    }

    async fn fetch_report(&self, report_id: &str) -> Result<LoadMetrics, AuditError> {
        let response = self
            .http_client
            .get(format!("{}/reports/{report_id}", self.config.base_url))
            .basic_auth(self.config.api_key.as_str(), Some(""))
            .send()
            .await
            .map_err(|error| classify_transport(PROVIDER, &error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(PROVIDER, status, body.as_str()));
        }

        let report = response
            .json::<ReportResponse>()
            .await
            .map_err(|error| classify_transport(PROVIDER, &error))?;

        Ok(load_metrics(report_id, report))
    }
}

#[async_trait]
impl ExternalAuditClient for GtmetrixAuditClient {
    fn source(&self) -> AuditSource {
        AuditSource::PerfTester
    }

    async fn run_audit(&self, url: &AuditUrl) -> Result<RawAuditData, AuditError> {
        let test_id = self.start_test(url).await?;
        let report_id = self.wait_for_report(test_id.as_str()).await?;
        let load = self.fetch_report(report_id.as_str()).await?;

        Ok(RawAuditData {
            load: Some(load),
            ..RawAuditData::real(AuditSource::PerfTester)
        })
    }
}

pub(crate) fn interpret_poll(status: StatusCode, location: Option<&str>, body: &str) -> PollOutcome {
    if status == StatusCode::SEE_OTHER {
        return match location.and_then(report_id_from_location) {
            Some(report_id) => PollOutcome::Completed(report_id),
            None => PollOutcome::Failed(AuditError::upstream(
                "report redirect without a report location",
            )),
        };
    }

    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        return PollOutcome::Retry(format!("transient status {status}"));
    }

    if !status.is_success() {
        return PollOutcome::Failed(classify_status(PROVIDER, status, body));
    }

    let state = match serde_json::from_str::<TestStateResponse>(body) {
        Ok(state) => state.data.attributes,
        Err(error) => {
            return PollOutcome::Failed(AuditError::upstream(format!(
                "undecodable test state: {error}"
            )));
        }
    };

    match state.state.as_deref() {
        Some("completed") => match state.report {
            Some(report_id) if !report_id.trim().is_empty() => PollOutcome::Completed(report_id),
            _ => PollOutcome::Pending,
        },
        Some("error") => PollOutcome::Failed(AuditError::upstream(format!(
            "performance test failed: {}",
            state.error.unwrap_or_else(|| "no error detail".to_owned())
        ))),
        _ => PollOutcome::Pending,
    }
}

pub(crate) fn report_id_from_location(location: &str) -> Option<String> {
    let (_, report_id) = location.rsplit_once("/reports/")?;
    (!report_id.is_empty() && report_id.chars().all(|character| character.is_ascii_alphanumeric()))
        .then(|| report_id.to_owned())
}

pub(crate) fn load_metrics(report_id: &str, report: ReportResponse) -> LoadMetrics {
    let attributes = report.data.attributes;
    let positive = |value: Option<f64>| value.filter(|value| value.is_finite() && *value > 0.0);

    LoadMetrics {
        load_time_seconds: positive(attributes.fully_loaded_time)
            .or_else(|| positive(attributes.onload_time))
            .map(|milliseconds| milliseconds / 1000.0),
        page_size_kb: attributes.page_bytes.map(|bytes| bytes / 1024.0),
        requests: attributes.page_requests,
        grade: attributes
            .gtmetrix_grade
            .filter(|grade| !grade.trim().is_empty()),
        performance_score: attributes.performance_score,
        structure_score: attributes.structure_score,
        largest_contentful_paint_seconds: attributes
            .largest_contentful_paint
            .map(|milliseconds| milliseconds / 1000.0),
        total_blocking_time_ms: attributes.total_blocking_time,
        cumulative_layout_shift: attributes.cumulative_layout_shift,
        speed_index_ms: attributes.speed_index,
        report_url: report
            .data
            .links
            .and_then(|links| links.report_url)
            .filter(|link| !link.trim().is_empty())
            .or_else(|| Some(format!("{REPORT_PAGE_BASE_URL}/{report_id}"))),
    }
}
