mod audits;
mod common;

pub use audits::{AuditRecordResponse, CreateAuditRequest};
pub use common::HealthResponse;

#[cfg(test)]
mod tests {
    use super::audits::{IssueResponse, SectionMetricsResponse, SectionResponse};
    use super::{AuditRecordResponse, CreateAuditRequest, HealthResponse};

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        HealthResponse::export(&config)?;
        CreateAuditRequest::export(&config)?;
        AuditRecordResponse::export(&config)?;
        SectionResponse::export(&config)?;
        SectionMetricsResponse::export(&config)?;
        IssueResponse::export(&config)?;
        ErrorResponse::export(&config)?;

        Ok(())
    }

    #[test]
    fn section_metrics_are_tagged_by_category() {
        let metrics = SectionMetricsResponse::UiUx {
            accessibility: 88.0,
            interactive_time_ms: 1800.0,
            responsive_design: true,
        };

        let value = serde_json::to_value(&metrics).unwrap_or_default();
        assert_eq!(value["category"], "ui-ux");
        assert_eq!(value["responsive_design"], true);
    }
}
