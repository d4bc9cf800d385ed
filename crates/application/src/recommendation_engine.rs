use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha256};
use tokio::task::JoinSet;
use webaudit_domain::{Category, Issue};

use crate::audit_ports::{
    CacheStore, RecommendationLocale, RecommendationPrompt, TextGenerationError, TextGenerator,
};

mod fallback;

pub use fallback::fallback_recommendation;

/// Tuning of recommendation generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationConfig {
    /// Maximum concurrent upstream calls within one category.
    pub concurrency: usize,
    /// Pause between two batches of one category.
    pub batch_pause: Duration,
    /// Waits before each retry of a rate-limited call.
    pub retry_delays: Vec<Duration>,
    /// Lifetime of cached recommendations.
    pub cache_ttl_seconds: u32,
    /// Output language.
    pub locale: RecommendationLocale,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            concurrency: 3,
            batch_pause: Duration::from_secs(1),
            retry_delays: [1, 2, 5, 10, 15]
                .into_iter()
                .map(Duration::from_secs)
                .collect(),
            cache_ttl_seconds: 86_400,
            locale: RecommendationLocale::Fr,
        }
    }
}

/// Produces one remediation text per issue.
///
/// Upstream failures never escape: every slot resolves to generated, cached
/// or canned text.
#[derive(Clone)]
pub struct RecommendationEngine {
    text_generator: Option<Arc<dyn TextGenerator>>,
    cache_store: Option<Arc<dyn CacheStore>>,
    config: Arc<RecommendationConfig>,
}

impl RecommendationEngine {
    /// Creates an engine that only serves canned recommendations.
    #[must_use]
    pub fn new(config: RecommendationConfig) -> Self {
        Self {
            text_generator: None,
            cache_store: None,
            config: Arc::new(config),
        }
    }

    /// Adds the upstream text generator.
    #[must_use]
    pub fn with_text_generator(mut self, text_generator: Arc<dyn TextGenerator>) -> Self {
        self.text_generator = Some(text_generator);
        self
    }

    /// Adds shared caching of generated recommendations.
    #[must_use]
    pub fn with_cache_store(mut self, cache_store: Arc<dyn CacheStore>) -> Self {
        self.cache_store = Some(cache_store);
        self
    }

    /// Returns the canned recommendation for one issue.
    #[must_use]
    pub fn fallback_for(&self, issue: &Issue) -> String {
        fallback_recommendation(issue, self.config.locale).to_owned()
    }

    /// Generates recommendations aligned positionally with `issues`.
    pub async fn generate(&self, issues: &[Issue], category: Category) -> Vec<String> {
        let Some(text_generator) = self.text_generator.clone() else {
            tracing::debug!(
                category = %category,
                count = issues.len(),
                "no text generator configured, using canned recommendations"
            );
            return issues.iter().map(|issue| self.fallback_for(issue)).collect();
        };

        tracing::info!(
            category = %category,
            count = issues.len(),
            "generating recommendations"
        );

        let batch_size = self.config.concurrency.max(1);
        let batch_count = issues.len().div_ceil(batch_size);
        let mut recommendations: Vec<Option<String>> = vec![None; issues.len()];

        for (batch_index, batch) in issues.chunks(batch_size).enumerate() {
            let offset = batch_index * batch_size;
            let mut tasks = JoinSet::new();

            for (position, issue) in batch.iter().enumerate() {
                let job = RecommendationJob {
                    text_generator: text_generator.clone(),
                    cache_store: self.cache_store.clone(),
                    config: self.config.clone(),
                    issue: issue.clone(),
                    category,
                };
                tasks.spawn(async move { (offset + position, job.run().await) });
            }

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((index, recommendation)) => {
                        if let Some(slot) = recommendations.get_mut(index) {
                            *slot = Some(recommendation);
                        }
                    }
                    Err(error) => {
                        tracing::error!(
                            category = %category,
                            error = %error,
                            "recommendation task failed"
                        );
                    }
                }
            }

            if batch_index + 1 < batch_count {
                tokio::time::sleep(self.config.batch_pause).await;
            }
        }

        issues
            .iter()
            .zip(recommendations)
            .map(|(issue, recommendation)| {
                recommendation.unwrap_or_else(|| self.fallback_for(issue))
            })
            .collect()
    }
}

struct RecommendationJob {
    text_generator: Arc<dyn TextGenerator>,
    cache_store: Option<Arc<dyn CacheStore>>,
    config: Arc<RecommendationConfig>,
    issue: Issue,
    category: Category,
}

impl RecommendationJob {
    async fn run(self) -> String {
        let cache_key = recommendation_cache_key(
            self.config.locale,
            self.category,
            self.issue.description(),
        );
        let source_key = self.issue.source_key().to_string();

        if let Some(cached) = self.cached(cache_key.as_str()).await {
            tracing::debug!(source_key = %source_key, "recommendation served from cache");
            return cached;
        }

        let prompt = RecommendationPrompt::for_issue(&self.issue, self.config.locale);
        let mut delays = self.config.retry_delays.iter();
        let mut attempt = 1_usize;

        loop {
            match self.text_generator.generate(&prompt).await {
                Ok(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        tracing::warn!(source_key = %source_key, "text generator returned empty text");
                        break;
                    }

                    self.store(cache_key.as_str(), text).await;
                    return text.to_owned();
                }
                Err(TextGenerationError::RateLimited(message)) => {
                    let Some(delay) = delays.next() else {
                        tracing::warn!(
                            source_key = %source_key,
                            attempt,
                            error = %message,
                            "rate limit retries exhausted, using canned recommendation"
                        );
                        break;
                    };

                    tracing::warn!(
                        source_key = %source_key,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "text generation rate limited, retrying"
                    );
                    tokio::time::sleep(*delay).await;
                    attempt += 1;
                }
                Err(error @ TextGenerationError::Failed(_)) => {
                    tracing::warn!(
                        source_key = %source_key,
                        error = %error,
                        "text generation failed, using canned recommendation"
                    );
                    break;
                }
            }
        }

        fallback_recommendation(&self.issue, self.config.locale).to_owned()
    }

    async fn cached(&self, key: &str) -> Option<String> {
        let cache_store = self.cache_store.as_ref()?;

        match cache_store.get(key).await {
            Ok(value) => value.filter(|text| !text.trim().is_empty()),
            Err(error) => {
                tracing::warn!(key, error = %error, "recommendation cache read failed");
                None
            }
        }
    }

    async fn store(&self, key: &str, text: &str) {
        let Some(cache_store) = self.cache_store.as_ref() else {
            return;
        };

        if let Err(error) = cache_store
            .set(key, text.to_owned(), self.config.cache_ttl_seconds)
            .await
        {
            tracing::warn!(key, error = %error, "recommendation cache write failed");
        }
    }
}

/// Cache key of a recommendation for one locale, category and issue description.
#[must_use]
pub fn recommendation_cache_key(
    locale: RecommendationLocale,
    category: Category,
    description: &str,
) -> String {
    let digest = Sha256::digest(description.as_bytes());
    format!(
        "recommendation:{}:{category}:{}",
        locale.as_str(),
        hex::encode(digest)
    )
}
