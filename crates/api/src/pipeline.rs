//! Per-request state machine.
//!
//! A request moves through
//! `Queued → Admitted → Attempting → {Succeeded | Retrying → Attempting | Failed}`.
//! [`RequestState::advance`] is a pure transition function; [`run`] drives it
//! against a transport while holding the queue lane.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::classify::classify;
use crate::error::ApiError;
use crate::queue::Lane;
use crate::retry::{AttemptRecord, RetryDecision, RetryPolicy};
use crate::transport::{RequestUnit, Transport, TransportFailure};

/// Where a request is in its lifetime.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    /// Waiting for the lane.
    Queued,
    /// Holds the lane, no attempt made yet.
    Admitted,
    /// Attempt `attempt` (starting at 1) is in flight.
    Attempting {
        /// The attempt number.
        attempt: u32,
    },
    /// Waiting `delay` before the next attempt.
    Retrying {
        /// The attempt that just failed.
        record: AttemptRecord,
        /// How long to wait.
        delay: Duration,
    },
    /// Terminal: the call returned this body.
    Succeeded(Value),
    /// Terminal: the last attempt failed with this error.
    Failed(ApiError),
}

/// Something that happened to a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The lane was acquired.
    Admitted,
    /// The next attempt is starting.
    Dispatch,
    /// The in-flight attempt finished.
    Completed(Result<Value, TransportFailure>),
}

impl RequestState {
    /// Returns `true` for `Succeeded` and `Failed`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    /// Applies `event`. Events that do not apply to the current state leave
    /// it unchanged.
    #[must_use]
    pub fn advance(self, event: Event, policy: &RetryPolicy) -> Self {
        match (self, event) {
            (Self::Queued, Event::Admitted) => Self::Admitted,
            (Self::Admitted, Event::Dispatch) => Self::Attempting { attempt: 1 },
            (Self::Retrying { record, .. }, Event::Dispatch) => Self::Attempting {
                attempt: record.attempt + 1,
            },
            (Self::Attempting { .. }, Event::Completed(Ok(body))) => Self::Succeeded(body),
            (Self::Attempting { attempt }, Event::Completed(Err(failure))) => {
                let record = AttemptRecord {
                    attempt,
                    last_error: classify(&failure),
                };
                match policy.decide(&record) {
                    RetryDecision::Retry { delay } => Self::Retrying { record, delay },
                    RetryDecision::GiveUp => Self::Failed(record.last_error),
                }
            }
            (state, _) => state,
        }
    }
}

/// Runs `unit` to a terminal state on `lane`.
///
/// Every attempt is admitted against the rolling window before it reaches
/// the transport. Only the last error is reported.
pub(crate) async fn run(
    transport: &dyn Transport,
    policy: &RetryPolicy,
    mut lane: Lane<'_>,
    unit: &RequestUnit,
) -> Result<Value, ApiError> {
    let mut state = RequestState::Queued.advance(Event::Admitted, policy);
    loop {
        let event = match state {
            RequestState::Succeeded(body) => return Ok(body),
            RequestState::Failed(err) => return Err(err),
            RequestState::Queued => Event::Admitted,
            RequestState::Admitted => Event::Dispatch,
            RequestState::Retrying { ref record, delay } => {
                warn!(
                    attempt = record.attempt,
                    kind = %record.last_error.kind(),
                    delay_ms = delay.as_millis() as u64,
                    error = %record.last_error,
                    "retrying request"
                );
                tokio::time::sleep(delay).await;
                Event::Dispatch
            }
            RequestState::Attempting { attempt } => {
                lane.admit().await;
                debug!(attempt, "sending request");
                Event::Completed(transport.send(unit).await)
            }
        };
        state = state.advance(event, policy);
    }
}
