//! Environment variables and `.env` support.
//!
//! Variables already set in the process environment take precedence over
//! the `.env` file, which in turn overrides config files.

use std::path::PathBuf;

use tracing::{debug, warn};

/// API key used to authenticate with Motion.
pub const API_KEY: &str = "MOTION_API_KEY";

/// Base URL of the Motion API.
pub const BASE_URL: &str = "MOTION_API_BASE_URL";

/// Nominal account quota, in requests per minute.
pub const RATE_LIMIT_PER_MINUTE: &str = "MOTION_RATE_LIMIT_PER_MINUTE";

/// Log filter used when `RUST_LOG` is not set.
pub const LOG_LEVEL: &str = "MOTION_LOG_LEVEL";

/// Loads `.env` from the working directory (or a parent) into the process
/// environment without overriding variables that are already set.
///
/// Returns the path of the file that was loaded.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenv::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env file");
            Some(path)
        }
        Err(err) if err.not_found() => None,
        Err(err) => {
            warn!(error = %err, "ignoring unreadable .env file");
            None
        }
    }
}

/// Reads a variable from the process environment. Blank values read as
/// unset.
#[must_use]
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
