use serde::{Deserialize, Serialize};
use ts_rs::TS;

mod conversions;

/// Incoming payload for starting an audit.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-audit-request.ts"
)]
pub struct CreateAuditRequest {
    pub url: String,
}

/// API representation of a stored audit.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-record-response.ts"
)]
pub struct AuditRecordResponse {
    pub id: String,
    pub url: String,
    pub created_at: String,
    pub owner_id: Option<String>,
    pub overall_score: f64,
    pub degraded: bool,
    pub seo: SectionResponse,
    pub performance: SectionResponse,
    pub ui_ux: SectionResponse,
}

/// API representation of one audit section.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/section-response.ts"
)]
pub struct SectionResponse {
    pub category: String,
    pub score: f64,
    /// `real` or `simulated`.
    pub provenance: String,
    pub degradation_reason: Option<String>,
    pub metrics: SectionMetricsResponse,
    pub issues: Vec<IssueResponse>,
}

/// Category-specific metrics of a section.
#[derive(Debug, Serialize, TS)]
#[serde(tag = "category")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/section-metrics-response.ts"
)]
pub enum SectionMetricsResponse {
    #[serde(rename = "seo")]
    Seo {
        keywords: Vec<String>,
        meta_description: String,
        canonical_url: String,
    },
    #[serde(rename = "performance")]
    Performance {
        load_time_seconds: f64,
        page_size_kb: f64,
        requests: u32,
        mobile_optimization: f64,
        grade: Option<String>,
        structure_score: Option<f64>,
        largest_contentful_paint_seconds: f64,
        total_blocking_time_ms: f64,
        cumulative_layout_shift: f64,
        speed_index_ms: f64,
        report_url: Option<String>,
    },
    #[serde(rename = "ui-ux")]
    UiUx {
        accessibility: f64,
        interactive_time_ms: f64,
        responsive_design: bool,
    },
}

/// API representation of one detected issue.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/issue-response.ts"
)]
pub struct IssueResponse {
    pub source_key: String,
    pub description: String,
    pub details: Option<String>,
    pub severity: String,
    pub recommendation: String,
}
