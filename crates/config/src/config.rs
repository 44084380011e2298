//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the motion server.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::env;
use crate::error::{ConfigError, Result};
use crate::persistence::{find_config_file_in, read_config_file, user_config_dir};
use crate::rate_limit::RateLimitConfig;
use crate::retry::RetryConfig;

/// Default Motion API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.usemotion.com/v1";

/// Default timeout of a single HTTP call, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Longest allowed request timeout, in seconds.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// The main configuration struct for the motion server.
///
/// # Examples
///
/// ```
/// use motion_config::{Config, RateLimitConfig};
///
/// let config = Config::default();
/// assert_eq!(config.base_url, "https://api.usemotion.com/v1");
/// assert!(config.api_key.is_none());
///
/// let config = Config {
///     rate_limit: RateLimitConfig::per_minute(60),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Motion API key.
    ///
    /// Usually left out of files and provided through `MOTION_API_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the Motion API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Outbound throughput limits.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Retry behavior for failed requests.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Timeout of a single HTTP call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            rate_limit: RateLimitConfig::default(),
            retry: RetryConfig::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Loads configuration from the default locations and the process
    /// environment.
    ///
    /// Sources, highest priority first: environment variables (including
    /// those loaded from `.env`), `./motion.json5` or `./motion.json`, the
    /// user config file, built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or
    /// parsed, an environment variable is malformed, or the result fails
    /// validation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use motion_config::Config;
    ///
    /// # fn example() -> motion_config::Result<()> {
    /// let config = Config::load()?;
    /// println!("Talking to {}", config.base_url);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        Self::load_with(
            Path::new("."),
            user_config_dir().as_deref(),
            env::process_env,
        )
    }

    /// Loads configuration from explicit locations, reading environment
    /// variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_with(
        local_dir: &Path,
        user_dir: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = match find_config_file_in(local_dir, user_dir) {
            Some(path) => read_config_file(&path)?,
            None => {
                debug!("no config file found, using defaults");
                Self::default()
            }
        };
        config.apply_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file, without environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails
    /// validation.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides fields with the environment variables that are set.
    ///
    /// `MOTION_API_BASE_URL` replaces the base URL and
    /// `MOTION_RATE_LIMIT_PER_MINUTE` the nominal quota. The API key is
    /// resolved separately by [`crate::auth::resolve_api_key`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if the quota is not a positive
    /// integer.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(env::BASE_URL) {
            debug!(base_url = %url, "base URL overridden from environment");
            self.base_url = url;
        }

        if let Some(raw) = lookup(env::RATE_LIMIT_PER_MINUTE) {
            self.rate_limit.per_minute = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| ConfigError::InvalidEnvVar {
                    name: env::RATE_LIMIT_PER_MINUTE,
                    value: raw.clone(),
                    reason: "expected a positive integer".to_string(),
                })?;
        }

        Ok(())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s) or a numeric setting
    /// is out of range.
    pub fn validate(&self) -> Result<()> {
        validate_base_url(&self.base_url)?;
        self.rate_limit.validate()?;
        self.retry.validate()?;

        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ConfigError::InvalidTimeout {
                reason: format!(
                    "{} seconds is outside 1 to {MAX_REQUEST_TIMEOUT_SECS}",
                    self.request_timeout_secs
                ),
            });
        }

        Ok(())
    }

    /// The request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn validate_base_url(url: &str) -> Result<()> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| ConfigError::InvalidBaseUrl {
            url: url.to_string(),
            reason: "scheme must be http or https".to_string(),
        })?;

    if rest.trim_matches('/').is_empty() {
        return Err(ConfigError::InvalidBaseUrl {
            url: url.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.rate_limit.per_minute, 12);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn api_key_not_serialized_when_none() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn validate_base_url_scheme() {
        for (url, ok) in [
            ("https://api.usemotion.com/v1", true),
            ("http://localhost:8080", true),
            ("ftp://api.usemotion.com", false),
            ("api.usemotion.com", false),
            ("https://", false),
        ] {
            let config = Config {
                base_url: url.to_string(),
                ..Default::default()
            };
            assert_eq!(config.validate().is_ok(), ok, "{url}");
        }
    }

    #[test]
    fn validate_timeout_range() {
        for (secs, ok) in [(0, false), (1, true), (300, true), (301, false)] {
            let config = Config {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate().is_ok(), ok, "{secs}s");
        }
    }

    #[test]
    fn apply_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(|name| match name {
                env::BASE_URL => Some("http://localhost:9000".to_string()),
                env::RATE_LIMIT_PER_MINUTE => Some("10".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.rate_limit.per_minute, 10);
    }

    #[test]
    fn apply_env_rejects_bad_rate() {
        for raw in ["fast", "0", "-3"] {
            let mut config = Config::default();
            let err = config
                .apply_env(|name| (name == env::RATE_LIMIT_PER_MINUTE).then(|| raw.to_string()))
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEnvVar { .. }), "{raw}");
        }
    }

    #[test]
    fn load_with_layers_file_and_env() {
        let local = TempDir::new().unwrap();
        std::fs::write(
            local.path().join("motion.json5"),
            r#"
            {
                // staging account
                base_url: "https://staging.example.com/v1",
                rate_limit: { per_minute: 30 },
                retry: { base_delay_ms: 100 },
            }
            "#,
        )
        .unwrap();

        let config = Config::load_with(local.path(), None, |name| {
            (name == env::RATE_LIMIT_PER_MINUTE).then(|| "20".to_string())
        })
        .unwrap();
        assert_eq!(config.base_url, "https://staging.example.com/v1");
        assert_eq!(config.rate_limit.per_minute, 20);
        assert_eq!(config.retry.base_delay(), Duration::from_millis(100));
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn load_with_no_files_uses_defaults() {
        let local = TempDir::new().unwrap();
        let config = Config::load_with(local.path(), None, no_env).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_validates() {
        let local = TempDir::new().unwrap();
        std::fs::write(
            local.path().join("motion.json"),
            r#"{"retry": {"max_attempts": 0}}"#,
        )
        .unwrap();
        let err = Config::load_with(local.path(), None, no_env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRetry { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json5");
        std::fs::write(&path, r#"{ api_key: "key_from_file", request_timeout_secs: 10 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("key_from_file"));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }
}
