//! motion - an MCP server for the Motion task-management API.
//!
//! Wires the configuration from [`motion_config`] into the API client from
//! [`motion_api`] and the tool server from [`motion_mcp`].

use motion_api::{ClientSettings, MotionClient, RetryPolicy};
use motion_config::Config;
use motion_mcp::{McpServer, MotionTools};
use secrecy::SecretString;

/// Client settings derived from a validated [`Config`].
#[must_use]
pub fn client_settings(config: &Config, api_key: SecretString) -> ClientSettings {
    let mut settings = ClientSettings::new(api_key);
    settings.base_url.clone_from(&config.base_url);
    settings.rate_limit_per_minute = config.rate_limit.per_minute;
    settings.safety_percent = config.rate_limit.safety_percent;
    settings.retry = RetryPolicy::new(config.retry.max_attempts, config.retry.base_delay());
    settings.timeout = config.request_timeout();
    settings
}

/// Builds the tool server for `config`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built from the settings.
pub fn build_server(
    config: &Config,
    api_key: SecretString,
) -> motion_api::Result<McpServer<MotionTools>> {
    let client = MotionClient::new(client_settings(config, api_key))?;
    Ok(McpServer::new(MotionTools::new(client)))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use motion_config::{RateLimitConfig, RetryConfig};

    use super::*;

    #[test]
    fn settings_follow_config() {
        let config = Config {
            base_url: "http://localhost:9000".to_string(),
            rate_limit: RateLimitConfig::per_minute(10),
            retry: RetryConfig {
                max_attempts: 5,
                base_delay_ms: 250,
            },
            request_timeout_secs: 12,
            ..Default::default()
        };
        let settings = client_settings(&config, SecretString::from("k".to_string()));
        assert_eq!(settings.base_url, "http://localhost:9000");
        assert_eq!(settings.rate_limit_per_minute, 10);
        assert_eq!(settings.safety_percent, 80);
        assert_eq!(settings.retry, RetryPolicy::new(5, Duration::from_millis(250)));
        assert_eq!(settings.timeout, Duration::from_secs(12));
    }

    #[test]
    fn default_config_builds_a_server() {
        let server = build_server(&Config::default(), SecretString::from("k".to_string())).unwrap();
        assert_eq!(server.handler().client().queue().cap(), 9);
    }

    #[test]
    fn config_defaults_match_client_defaults() {
        let config = Config::default();
        let client = ClientSettings::new(SecretString::from("k".to_string()));
        let mapped = client_settings(&config, SecretString::from("k".to_string()));

        assert_eq!(config.base_url, motion_api::DEFAULT_BASE_URL);
        assert_eq!(mapped.base_url, client.base_url);
        assert_eq!(mapped.rate_limit_per_minute, client.rate_limit_per_minute);
        assert_eq!(mapped.safety_percent, client.safety_percent);
        assert_eq!(mapped.retry, client.retry);
        assert_eq!(mapped.timeout, client.timeout);
    }
}
