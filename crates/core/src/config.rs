//! Shared configuration logic
//!
//! Handles loading of the required secrets from environment variables.

use crate::error::ConfigError;
use std::env;
use std::fmt;
use std::str::FromStr;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Credentials every service needs before it may start polling
#[derive(Clone)]
pub struct CoreConfig {
    /// OAuth token for the homework status API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives every notification
    pub telegram_chat_id: i64,
}

impl CoreConfig {
    /// Load configuration from environment variables
    ///
    /// This will also initialize dotenv if it hasn't been done yet.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let practicum_token = required(&lookup, PRACTICUM_TOKEN)?;
        let telegram_token = required(&lookup, TELEGRAM_TOKEN)?;
        let telegram_chat_id = required(&lookup, TELEGRAM_CHAT_ID)?
            .parse::<i64>()
            .map_err(|e| ConfigError::InvalidValue {
                name: TELEGRAM_CHAT_ID.to_string(),
                reason: format!("{}", e),
            })?;

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
        })
    }
}

impl fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreConfig")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Fetch a variable that must be present and non-blank
pub fn required<F>(lookup: &F, name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => {
            tracing::error!("Required environment variable {} is not set", name);
            Err(ConfigError::MissingEnvVar(name.to_string()))
        }
    }
}

/// Parse an optional variable, falling back to `default` when it is unset
pub fn optional<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidValue {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_core_config_from_lookup() {
        let lookup = lookup_from(&[
            (PRACTICUM_TOKEN, "practicum"),
            (TELEGRAM_TOKEN, "bot"),
            (TELEGRAM_CHAT_ID, "123456"),
        ]);

        let config = CoreConfig::from_lookup(lookup).unwrap();
        assert_eq!(config.practicum_token, "practicum");
        assert_eq!(config.telegram_token, "bot");
        assert_eq!(config.telegram_chat_id, 123456);
    }

    #[test]
    fn test_missing_chat_id_is_reported() {
        let lookup = lookup_from(&[(PRACTICUM_TOKEN, "practicum"), (TELEGRAM_TOKEN, "bot")]);

        let err = CoreConfig::from_lookup(lookup).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar(TELEGRAM_CHAT_ID.to_string()));
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let lookup = lookup_from(&[
            (PRACTICUM_TOKEN, "   "),
            (TELEGRAM_TOKEN, "bot"),
            (TELEGRAM_CHAT_ID, "1"),
        ]);

        let err = CoreConfig::from_lookup(lookup).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar(PRACTICUM_TOKEN.to_string()));
    }

    #[test]
    fn test_non_numeric_chat_id() {
        let lookup = lookup_from(&[
            (PRACTICUM_TOKEN, "practicum"),
            (TELEGRAM_TOKEN, "bot"),
            (TELEGRAM_CHAT_ID, "@channel"),
        ]);

        let err = CoreConfig::from_lookup(lookup).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == TELEGRAM_CHAT_ID));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let config = CoreConfig {
            practicum_token: "secret-practicum".to_string(),
            telegram_token: "secret-bot".to_string(),
            telegram_chat_id: 42,
        };

        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("secret-practicum"));
        assert!(!debug_str.contains("secret-bot"));
        assert!(debug_str.contains("42"));
    }

    #[test]
    fn test_optional_falls_back_to_default() {
        let lookup = lookup_from(&[("INTERVAL", "30"), ("BROKEN", "soon")]);

        assert_eq!(optional(&lookup, "INTERVAL", 600_u64), Ok(30));
        assert_eq!(optional(&lookup, "UNSET", 600_u64), Ok(600));
        assert!(optional(&lookup, "BROKEN", 600_u64).is_err());
    }

    #[test]
    #[serial]
    fn test_core_config_from_env() {
        // Set env vars
        unsafe {
            env::set_var(PRACTICUM_TOKEN, "env_practicum");
            env::set_var(TELEGRAM_TOKEN, "env_bot");
            env::set_var(TELEGRAM_CHAT_ID, "-100200300");
        }

        let config = CoreConfig::from_env();
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.practicum_token, "env_practicum");
        assert_eq!(config.telegram_chat_id, -100200300);

        // Clean up
        unsafe {
            env::remove_var(PRACTICUM_TOKEN);
            env::remove_var(TELEGRAM_TOKEN);
            env::remove_var(TELEGRAM_CHAT_ID);
        }
    }
}
