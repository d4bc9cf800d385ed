use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct StartTestResponse {
    pub data: ResourceIdentifier,
    pub meta: Option<StartTestMeta>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResourceIdentifier {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartTestMeta {
    pub credits_left: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TestStateResponse {
    pub data: TestStateData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TestStateData {
    pub attributes: TestStateAttributes,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TestStateAttributes {
    pub state: Option<String>,
    pub report: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportResponse {
    pub data: ReportData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportData {
    #[serde(default)]
    pub attributes: ReportAttributes,
    pub links: Option<ReportLinks>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportAttributes {
    pub fully_loaded_time: Option<f64>,
    pub onload_time: Option<f64>,
    pub page_bytes: Option<f64>,
    pub page_requests: Option<u32>,
    pub gtmetrix_grade: Option<String>,
    pub performance_score: Option<f64>,
    pub structure_score: Option<f64>,
    pub largest_contentful_paint: Option<f64>,
    pub total_blocking_time: Option<f64>,
    pub cumulative_layout_shift: Option<f64>,
    pub speed_index: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportLinks {
    pub report_url: Option<String>,
}
