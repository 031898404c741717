//! Configuration for worker process
//!
//! Loads configuration from environment variables

use hwbot_core::config::{CoreConfig, optional};
use hwbot_core::ConfigError;
use std::env;
use std::ops::Deref;
use url::Url;

/// Status API queried when `PRACTICUM_ENDPOINT` is not set
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Worker configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Core configuration
    pub core: CoreConfig,

    /// Poll interval in seconds
    pub poll_interval_secs: u64,

    /// How far back the first poll looks, in seconds
    pub lookback_secs: i64,

    /// Identical consecutive failure notices sent before going quiet
    pub max_repeated_errors: u32,

    /// Timeout for a single status API request, in seconds
    pub request_timeout_secs: u64,

    /// Status API URL
    pub endpoint: Url,

    /// Bot API base URL override
    pub telegram_api_url: Option<Url>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let core = CoreConfig::from_env()?;
        Self::with_core(core, &|name: &str| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let core = CoreConfig::from_lookup(&lookup)?;
        Self::with_core(core, &lookup)
    }

    fn with_core<F>(core: CoreConfig, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let poll_interval_secs = optional(lookup, "WORKER_POLL_INTERVAL_SECS", 600)?;
        if poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "WORKER_POLL_INTERVAL_SECS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            core,
            poll_interval_secs,
            lookback_secs: optional(lookup, "WORKER_LOOKBACK_SECS", 20 * 24 * 60 * 60)?,
            max_repeated_errors: optional(lookup, "WORKER_MAX_REPEATED_ERRORS", 5)?,
            request_timeout_secs: optional(lookup, "WORKER_REQUEST_TIMEOUT_SECS", 30)?,
            endpoint: parse_url(
                "PRACTICUM_ENDPOINT",
                &optional(lookup, "PRACTICUM_ENDPOINT", DEFAULT_ENDPOINT.to_string())?,
            )?,
            telegram_api_url: lookup("TELEGRAM_API_URL")
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| parse_url("TELEGRAM_API_URL", &raw))
                .transpose()?,
        })
    }
}

fn parse_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

impl Deref for Config {
    type Target = CoreConfig;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let mut vars: HashMap<String, String> = HashMap::from([
            ("PRACTICUM_TOKEN".to_string(), "practicum".to_string()),
            ("TELEGRAM_TOKEN".to_string(), "bot".to_string()),
            ("TELEGRAM_CHAT_ID".to_string(), "42".to_string()),
        ]);
        for (k, v) in pairs {
            vars.insert(k.to_string(), v.to_string());
        }
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_has_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.poll_interval_secs, 600);
        assert_eq!(config.lookback_secs, 1_728_000);
        assert_eq!(config.max_repeated_errors, 5);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert!(config.telegram_api_url.is_none());
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("WORKER_POLL_INTERVAL_SECS", "6"),
            ("WORKER_LOOKBACK_SECS", "600"),
            ("WORKER_MAX_REPEATED_ERRORS", "2"),
            ("PRACTICUM_ENDPOINT", "http://localhost:8080/statuses/"),
            ("TELEGRAM_API_URL", "http://localhost:8081"),
        ]))
        .unwrap();

        assert_eq!(config.poll_interval_secs, 6);
        assert_eq!(config.lookback_secs, 600);
        assert_eq!(config.max_repeated_errors, 2);
        assert_eq!(config.endpoint.as_str(), "http://localhost:8080/statuses/");
        assert_eq!(
            config.telegram_api_url.as_ref().map(Url::as_str),
            Some("http://localhost:8081/")
        );
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("WORKER_POLL_INTERVAL_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "WORKER_POLL_INTERVAL_SECS"));
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("PRACTICUM_ENDPOINT", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "PRACTICUM_ENDPOINT"));
    }

    #[test]
    fn test_missing_secret_fails_before_worker_settings() {
        let err = Config::from_lookup(|name: &str| {
            (name == "PRACTICUM_TOKEN").then(|| "practicum".to_string())
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar("TELEGRAM_TOKEN".to_string()));
    }

    #[test]
    fn test_config_deref() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        // Test Deref trait
        assert_eq!(config.practicum_token, "practicum");
        assert_eq!(config.telegram_chat_id, 42);
    }

    #[test]
    fn test_config_debug_hides_tokens() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("poll_interval_secs"));
        assert!(!debug_str.contains("\"bot\""));
    }
}
