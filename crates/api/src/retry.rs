//! Retry decisions for failed attempts.

use std::time::Duration;

use crate::error::{ApiError, ErrorKind};

/// Default total number of attempts per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay between attempts.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(5);

/// The outcome of one failed attempt.
///
/// Lives only for the retry sequence of one request; the error of an
/// earlier attempt is replaced by the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    /// The attempt that failed, starting at 1.
    pub attempt: u32,
    /// Why it failed.
    pub last_error: ApiError,
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait `delay`, then attempt again.
    Retry {
        /// How long to wait first.
        delay: Duration,
    },
    /// Stop and report the last error.
    GiveUp,
}

/// Bounded retry policy.
///
/// Rate-limited calls wait a flat `2 × base_delay` because the quota resets
/// on a fixed clock. Server and network failures back off linearly:
/// `base_delay × attempt`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use motion_api::{ApiError, AttemptRecord, ErrorKind, RetryDecision, RetryPolicy};
///
/// let policy = RetryPolicy::default();
/// let record = AttemptRecord {
///     attempt: 1,
///     last_error: ApiError::new(ErrorKind::ServerError, Some(502), "bad gateway"),
/// };
/// assert_eq!(
///     policy.decide(&record),
///     RetryDecision::Retry { delay: Duration::from_secs(5) }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Unit of every retry delay.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy. `max_attempts` is raised to at least 1.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Decides whether the request gets another attempt, and when.
    #[must_use]
    pub fn decide(&self, record: &AttemptRecord) -> RetryDecision {
        if record.attempt >= self.max_attempts || !record.last_error.is_retryable() {
            return RetryDecision::GiveUp;
        }
        let delay = match record.last_error.kind() {
            ErrorKind::RateLimited => self.base_delay.saturating_mul(2),
            _ => self.base_delay.saturating_mul(record.attempt),
        };
        RetryDecision::Retry { delay }
    }
}
