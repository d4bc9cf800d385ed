use async_trait::async_trait;
use webaudit_core::AppResult;
use webaudit_domain::StoredAudit;

/// Rendered report document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    /// MIME type of the document.
    pub content_type: &'static str,
    /// Suggested download file name.
    pub file_name: String,
    /// Document bytes.
    pub bytes: Vec<u8>,
}

/// Port for turning a completed audit into a downloadable document.
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    /// Renders one stored audit.
    async fn render(&self, audit: &StoredAudit) -> AppResult<RenderedReport>;
}
