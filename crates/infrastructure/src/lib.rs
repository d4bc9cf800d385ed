//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

#[cfg(test)]
mod canned_http;
mod gtmetrix_audit_client;
mod http_status;
mod in_memory_audit_record_repository;
mod in_memory_cache_store;
mod mistral_text_generator;
mod pagespeed_audit_client;
mod postgres_audit_record_repository;
mod redis_cache_store;
mod text_report_renderer;

pub use gtmetrix_audit_client::{GtmetrixAuditClient, GtmetrixConfig};
pub use in_memory_audit_record_repository::InMemoryAuditRecordRepository;
pub use in_memory_cache_store::InMemoryCacheStore;
pub use mistral_text_generator::MistralTextGenerator;
pub use pagespeed_audit_client::PageSpeedAuditClient;
pub use postgres_audit_record_repository::PostgresAuditRecordRepository;
pub use redis_cache_store::RedisCacheStore;
pub use text_report_renderer::TextReportRenderer;
