use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use tracing_subscriber::EnvFilter;
use webaudit_application::RecommendationLocale;
use webaudit_core::AppError;

const DEFAULT_PAGESPEED_API_BASE_URL: &str = "https://www.googleapis.com/pagespeedonline/v5";
const DEFAULT_GTMETRIX_API_BASE_URL: &str = "https://gtmetrix.com/api/2.0";
const DEFAULT_MISTRAL_API_BASE_URL: &str = "https://api.mistral.ai/v1";

/// Runtime settings of the API process, read once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub cache_key_prefix: String,
    pub pagespeed_api_base_url: String,
    pub pagespeed_api_key: Option<String>,
    pub page_audit_timeout_seconds: u64,
    pub gtmetrix_api_base_url: String,
    pub gtmetrix_api_key: Option<String>,
    pub gtmetrix_poll_interval_seconds: u64,
    pub gtmetrix_max_polls: u32,
    pub perf_test_timeout_seconds: u64,
    pub audit_result_cache_ttl_seconds: u32,
    pub mistral_api_base_url: String,
    pub mistral_api_key: Option<String>,
    pub mistral_model: String,
    pub recommendation_concurrency: usize,
    pub recommendation_locale: RecommendationLocale,
    pub recommendation_cache_ttl_seconds: u32,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let optional = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let or_default = |name: &str, default: &str| {
            optional(name).unwrap_or_else(|| default.to_owned())
        };

        let recommendation_concurrency = parsed(&optional, "RECOMMENDATION_CONCURRENCY", 3_usize)?;
        if recommendation_concurrency == 0 {
            return Err(AppError::Validation(
                "RECOMMENDATION_CONCURRENCY must be at least 1".to_owned(),
            ));
        }

        let gtmetrix_max_polls = parsed(&optional, "GTMETRIX_MAX_POLLS", 20_u32)?;
        if gtmetrix_max_polls == 0 {
            return Err(AppError::Validation(
                "GTMETRIX_MAX_POLLS must be at least 1".to_owned(),
            ));
        }

        let recommendation_locale = optional("RECOMMENDATION_LOCALE")
            .map(|value| RecommendationLocale::parse(value.as_str()))
            .transpose()?
            .unwrap_or_default();

        let database_url = optional("DATABASE_URL");
        if migrate_only && database_url.is_none() {
            return Err(AppError::Validation(
                "DATABASE_URL is required to run migrations".to_owned(),
            ));
        }

        Ok(Self {
            migrate_only,
            api_host: or_default("API_HOST", "127.0.0.1"),
            api_port: parsed(&optional, "API_PORT", 3001_u16)?,
            frontend_url: or_default("FRONTEND_URL", "http://localhost:3000"),
            database_url,
            redis_url: optional("REDIS_URL"),
            cache_key_prefix: or_default("CACHE_KEY_PREFIX", "webaudit"),
            pagespeed_api_base_url: or_default(
                "PAGESPEED_API_BASE_URL",
                DEFAULT_PAGESPEED_API_BASE_URL,
            ),
            pagespeed_api_key: optional("PAGESPEED_API_KEY"),
            page_audit_timeout_seconds: parsed(&optional, "PAGE_AUDIT_TIMEOUT_SECONDS", 120_u64)?,
            gtmetrix_api_base_url: or_default(
                "GTMETRIX_API_BASE_URL",
                DEFAULT_GTMETRIX_API_BASE_URL,
            ),
            gtmetrix_api_key: optional("GTMETRIX_API_KEY"),
            gtmetrix_poll_interval_seconds: parsed(
                &optional,
                "GTMETRIX_POLL_INTERVAL_SECONDS",
                15_u64,
            )?,
            gtmetrix_max_polls,
            perf_test_timeout_seconds: parsed(&optional, "PERF_TEST_TIMEOUT_SECONDS", 300_u64)?,
            audit_result_cache_ttl_seconds: parsed(
                &optional,
                "AUDIT_RESULT_CACHE_TTL_SECONDS",
                86_400_u32,
            )?,
            mistral_api_base_url: or_default("MISTRAL_API_BASE_URL", DEFAULT_MISTRAL_API_BASE_URL),
            mistral_api_key: optional("MISTRAL_API_KEY"),
            mistral_model: or_default("MISTRAL_MODEL", "mistral-medium"),
            recommendation_concurrency,
            recommendation_locale,
            recommendation_cache_ttl_seconds: parsed(
                &optional,
                "RECOMMENDATION_CACHE_TTL_SECONDS",
                86_400_u32,
            )?,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parsed<T>(
    optional: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(name) {
        None => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name} '{value}': {error}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use webaudit_application::RecommendationLocale;

    use super::ApiConfig;

    fn load(pairs: &[(&str, &str)], migrate_only: bool) -> Result<ApiConfig, String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();

        ApiConfig::from_lookup(migrate_only, |name| values.get(name).cloned())
            .map_err(|error| error.to_string())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[], false);
        assert!(config.is_ok());
        let config = config.unwrap_or_else(|_| unreachable!());

        assert_eq!(config.api_port, 3001);
        assert_eq!(config.frontend_url, "http://localhost:3000");
        assert_eq!(config.cache_key_prefix, "webaudit");
        assert_eq!(config.page_audit_timeout_seconds, 120);
        assert_eq!(config.perf_test_timeout_seconds, 300);
        assert_eq!(config.gtmetrix_max_polls, 20);
        assert_eq!(config.recommendation_concurrency, 3);
        assert_eq!(config.recommendation_locale, RecommendationLocale::Fr);
        assert_eq!(config.mistral_model, "mistral-medium");
        assert!(config.database_url.is_none());
        assert!(config.gtmetrix_api_key.is_none());
        assert!(config.socket_address().is_ok());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[("GTMETRIX_API_KEY", "   "), ("REDIS_URL", "")], false)
            .unwrap_or_else(|_| unreachable!());

        assert!(config.gtmetrix_api_key.is_none());
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn explicit_values_are_parsed() {
        let config = load(
            &[
                ("API_PORT", "8080"),
                ("RECOMMENDATION_LOCALE", "en"),
                ("RECOMMENDATION_CONCURRENCY", "5"),
                ("AUDIT_RESULT_CACHE_TTL_SECONDS", "0"),
            ],
            false,
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.api_port, 8080);
        assert_eq!(config.recommendation_locale, RecommendationLocale::En);
        assert_eq!(config.recommendation_concurrency, 5);
        assert_eq!(config.audit_result_cache_ttl_seconds, 0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let port = load(&[("API_PORT", "not-a-port")], false);
        assert!(port.is_err_and(|message| message.contains("API_PORT")));

        assert!(load(&[("RECOMMENDATION_CONCURRENCY", "0")], false).is_err());
        assert!(load(&[("RECOMMENDATION_LOCALE", "de")], false).is_err());
        assert!(load(&[("GTMETRIX_MAX_POLLS", "-1")], false).is_err());
    }

    #[test]
    fn migrate_requires_a_database() {
        assert!(load(&[], true).is_err());
        assert!(load(&[("DATABASE_URL", "postgres://localhost/webaudit")], true).is_ok());
    }

    #[test]
    fn invalid_host_is_reported_when_binding() {
        let config = load(&[("API_HOST", "localhost:3001")], false)
            .unwrap_or_else(|_| unreachable!());
        assert!(config.socket_address().is_err());
    }
}
