//! Motion API client for the motion application.
//!
//! This crate sends every call to the Motion REST API through one request
//! pipeline:
//!
//! - [`transport`]: performs a single HTTP call ([`Transport`], [`HttpTransport`])
//! - [`classify`]: maps a failed call to an [`ApiError`] with an explicit [`ErrorKind`]
//! - [`retry`]: decides whether and when a failed call is attempted again
//! - [`queue`]: a single-lane gate capping calls per rolling window
//! - [`pipeline`]: the per-request state machine tying the above together
//! - [`client`]: [`MotionClient`], whose [`request`](MotionClient::request)
//!   is the only way out
//! - [`resources`]: typed methods for each Motion resource
//!
//! # Rate limiting
//!
//! Motion enforces a per-account quota. The client derives an admission cap
//! from the configured quota (80% of it by default) and holds any call that
//! would exceed it until the window rolls over. Calls leave in the order
//! they were made, one at a time.
//!
//! # Examples
//!
//! ```no_run
//! use secrecy::SecretString;
//! use motion_api::{ClientSettings, MotionClient, TaskListOptions};
//!
//! # async fn example() -> motion_api::Result<()> {
//! let mut settings = ClientSettings::new(SecretString::from("key".to_string()));
//! settings.rate_limit_per_minute = 10;
//! let client = MotionClient::new(settings)?;
//!
//! let options = TaskListOptions {
//!     workspace_id: Some("ws_123".to_string()),
//!     ..Default::default()
//! };
//! for task in client.list_tasks(&options).await?.items {
//!     println!("{}", task.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod client;
pub mod error;
pub mod pipeline;
pub mod queue;
pub mod resources;
pub mod retry;
pub mod transport;

#[cfg(test)]
mod testing;

// Re-export primary types at crate root for convenience
pub use classify::classify;
pub use client::{ClientSettings, DEFAULT_RATE_LIMIT_PER_MINUTE, MotionClient};
pub use error::{ApiError, Error, ErrorKind, Result};
pub use queue::{Lane, ThroughputQueue};
pub use resources::comments::CommentListOptions;
pub use resources::custom_fields::FieldTarget;
pub use resources::projects::ProjectListOptions;
pub use resources::recurring_tasks::RecurringTaskListOptions;
pub use resources::schedules::ScheduleQuery;
pub use resources::tasks::{TaskListOptions, TaskMove};
pub use resources::users::UserListOptions;
pub use retry::{AttemptRecord, RetryDecision, RetryPolicy};
pub use transport::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpTransport, RequestUnit, Transport, TransportFailure};
