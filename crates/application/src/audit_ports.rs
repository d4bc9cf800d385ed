mod cache;
mod client;
mod raw_data;
mod report;
mod repository;
mod text_generation;

pub use cache::CacheStore;
pub use client::{AuditError, AuditErrorKind, ExternalAuditClient};
pub use raw_data::{
    AuditSource, CategoryScores, LoadMetrics, PageFacts, RawAuditData, RawDiagnostic,
};
pub use report::{RenderedReport, ReportRenderer};
pub use repository::AuditRecordRepository;
pub use text_generation::{
    RecommendationLocale, RecommendationPrompt, TextGenerationError, TextGenerator,
};
