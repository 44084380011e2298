//! Retry configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default total attempts per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay between attempts, in milliseconds.
pub const DEFAULT_BASE_DELAY_MS: u64 = 5000;

/// Upper bound on `max_attempts`.
pub const MAX_ATTEMPTS_LIMIT: u32 = 10;

/// How failed requests are retried.
///
/// Rate-limited requests wait twice the base delay; server and network
/// failures wait the base delay times the attempt number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per request, the first one included.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base delay between attempts, in milliseconds.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_base_delay_ms() -> u64 {
    DEFAULT_BASE_DELAY_MS
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
        }
    }
}

impl RetryConfig {
    /// The base delay as a [`Duration`].
    #[must_use]
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Validates the retry configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_attempts` is outside 1 to 10.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_ATTEMPTS_LIMIT).contains(&self.max_attempts) {
            return Err(ConfigError::InvalidRetry {
                reason: format!(
                    "max_attempts {} must be between 1 and {MAX_ATTEMPTS_LIMIT}",
                    self.max_attempts
                ),
            });
        }
        Ok(())
    }
}
