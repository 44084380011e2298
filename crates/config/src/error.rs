//! Error types for configuration operations.
//!
//! This module defines the error types that can occur during configuration
//! loading, parsing, and validation.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 configuration.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// An environment variable held a value that could not be used.
    #[error("invalid value for {name}: \"{value}\" ({reason})")]
    InvalidEnvVar {
        /// The variable name.
        name: &'static str,
        /// The offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Invalid rate limit settings.
    #[error("invalid rate limit: {reason}")]
    InvalidRateLimit {
        /// The reason the settings are invalid.
        reason: String,
    },

    /// Invalid retry settings.
    #[error("invalid retry settings: {reason}")]
    InvalidRetry {
        /// The reason the settings are invalid.
        reason: String,
    },

    /// Invalid request timeout.
    #[error("invalid request timeout: {reason}")]
    InvalidTimeout {
        /// The reason the timeout is invalid.
        reason: String,
    },

    /// The base URL is not an http(s) URL.
    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// No API key was found in the environment or the config file.
    #[error("MOTION_API_KEY environment variable is required")]
    MissingApiKey,
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            ConfigError::MissingApiKey.to_string(),
            "MOTION_API_KEY environment variable is required"
        );

        let err = ConfigError::InvalidEnvVar {
            name: "MOTION_RATE_LIMIT_PER_MINUTE",
            value: "fast".to_string(),
            reason: "expected a positive integer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for MOTION_RATE_LIMIT_PER_MINUTE: \"fast\" (expected a positive integer)"
        );
    }
}
