//! Configuration management for the motion server.
//!
//! This crate handles loading and validating configuration from multiple
//! sources (environment, `.env`, files, defaults) and resolving the Motion
//! API key.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`rate_limit`]: Request quota and safety margin
//! - [`retry`]: Retry attempts and delays
//! - [`auth`]: API key resolution
//! - [`env`]: Environment variable names and `.env` loading
//! - [`persistence`]: Config file discovery and reading
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! Configuration is loaded from multiple sources with the following priority
//! (highest to lowest):
//!
//! 1. Environment variables (`MOTION_API_KEY`, `MOTION_API_BASE_URL`,
//!    `MOTION_RATE_LIMIT_PER_MINUTE`)
//! 2. A `.env` file in the working directory
//! 3. Local config (`./motion.json5` or `./motion.json`)
//! 4. User config (`~/.config/motion/config.json5` or `~/.config/motion/config.json`)
//! 5. Built-in defaults
//!
//! # File Format
//!
//! ```json5
//! {
//!   base_url: "https://api.usemotion.com/v1",
//!   rate_limit: { per_minute: 12, safety_percent: 80 },
//!   retry: { max_attempts: 3, base_delay_ms: 5000 },
//!   request_timeout_secs: 30,
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use motion_config::{Config, auth::resolve_api_key, env::load_dotenv};
//!
//! # fn example() -> motion_config::Result<()> {
//! load_dotenv();
//! let config = Config::load()?;
//! let api_key = resolve_api_key(&config)?;
//! println!("quota: {} requests per minute", config.rate_limit.per_minute);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod env;
pub mod error;
pub mod persistence;
pub mod rate_limit;
pub mod retry;

// Re-export primary types at crate root for convenience
pub use config::Config;
pub use error::{ConfigError, Result};
pub use rate_limit::RateLimitConfig;
pub use retry::RetryConfig;
