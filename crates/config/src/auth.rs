//! API key resolution.
//!
//! The key is looked up in order:
//!
//! 1. `MOTION_API_KEY` (process environment or `.env`)
//! 2. `api_key` from the config file
//!
//! There is no unauthenticated mode; a missing key is an error.

use secrecy::SecretString;

use crate::config::Config;
use crate::env;
use crate::error::{ConfigError, Result};

/// Resolves the API key from the process environment or `config`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingApiKey`] if neither source has a key.
pub fn resolve_api_key(config: &Config) -> Result<SecretString> {
    resolve_api_key_with(config, env::process_env)
}

/// Resolves the API key, reading variables through `lookup`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingApiKey`] if neither source has a key.
///
/// # Examples
///
/// ```
/// use secrecy::ExposeSecret;
/// use motion_config::{Config, auth::resolve_api_key_with};
///
/// let config = Config {
///     api_key: Some("from_file".to_string()),
///     ..Default::default()
/// };
///
/// let key = resolve_api_key_with(&config, |_| Some("from_env".to_string())).unwrap();
/// assert_eq!(key.expose_secret(), "from_env");
///
/// let key = resolve_api_key_with(&config, |_| None).unwrap();
/// assert_eq!(key.expose_secret(), "from_file");
/// ```
pub fn resolve_api_key_with(
    config: &Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString> {
    lookup(env::API_KEY)
        .or_else(|| config.api_key.clone())
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .map(SecretString::from)
        .ok_or(ConfigError::MissingApiKey)
}
