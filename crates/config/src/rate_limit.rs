//! Rate limit configuration.
//!
//! Motion enforces a per-account request quota. The client keeps a safety
//! margin below the nominal quota so that clock skew and other clients
//! sharing the same key do not push it over.
//!
//! ```json5
//! {
//!   rate_limit: { per_minute: 12, safety_percent: 80 },
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default nominal quota (requests per minute).
pub const DEFAULT_PER_MINUTE: u32 = 12;

/// Default share of the quota the client uses, in percent.
pub const DEFAULT_SAFETY_PERCENT: u32 = 80;

/// Configuration for outbound request throughput.
///
/// # Examples
///
/// ```
/// use motion_config::RateLimitConfig;
///
/// let config = RateLimitConfig::default();
/// assert_eq!(config.per_minute, 12);
///
/// let config = RateLimitConfig::per_minute(10);
/// assert_eq!(config.safety_percent, 80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Nominal account quota, in requests per minute.
    #[serde(default = "default_per_minute")]
    pub per_minute: u32,

    /// Share of the quota actually used, in percent (1-100).
    #[serde(default = "default_safety_percent")]
    pub safety_percent: u32,
}

fn default_per_minute() -> u32 {
    DEFAULT_PER_MINUTE
}

fn default_safety_percent() -> u32 {
    DEFAULT_SAFETY_PERCENT
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_minute: DEFAULT_PER_MINUTE,
            safety_percent: DEFAULT_SAFETY_PERCENT,
        }
    }
}

impl RateLimitConfig {
    /// Creates a configuration for the given quota with the default margin.
    #[must_use]
    pub fn per_minute(per_minute: u32) -> Self {
        Self {
            per_minute,
            ..Self::default()
        }
    }

    /// Validates the rate limit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the quota is zero or the safety margin is not
    /// between 1 and 100 percent.
    pub fn validate(&self) -> Result<()> {
        if self.per_minute == 0 {
            return Err(ConfigError::InvalidRateLimit {
                reason: "per_minute must be at least 1".to_string(),
            });
        }

        if !(1..=100).contains(&self.safety_percent) {
            return Err(ConfigError::InvalidRateLimit {
                reason: format!(
                    "safety_percent {} must be between 1 and 100",
                    self.safety_percent
                ),
            });
        }

        Ok(())
    }
}
