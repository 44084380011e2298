//! Maps transport failures to classified errors.

use serde_json::Value;

use crate::error::{ApiError, ErrorKind};
use crate::transport::TransportFailure;

/// Classifies a transport failure.
///
/// The kind is decided by the status alone: 429, 401 and 404 have their own
/// kinds, the rest of 4xx is a client error, 5xx a server error and a missing
/// status a network error. Non-2xx statuses below 400 are treated as client
/// errors. The message prefers the `message` field of the response body over
/// the HTTP reason phrase.
///
/// # Examples
///
/// ```
/// use motion_api::{ErrorKind, TransportFailure, classify};
///
/// let failure = TransportFailure::http(
///     429,
///     Some(serde_json::json!({"message": "slow down"})),
///     "Too Many Requests",
/// );
/// let err = classify(&failure);
/// assert_eq!(err.kind(), ErrorKind::RateLimited);
/// assert!(err.is_retryable());
/// assert!(err.message().contains("slow down"));
/// ```
#[must_use]
pub fn classify(failure: &TransportFailure) -> ApiError {
    let Some(status) = failure.status() else {
        return ApiError::new(
            ErrorKind::Network,
            None,
            format!("Network error: {}", failure.reason()),
        );
    };

    let detail = upstream_message(failure.body()).unwrap_or_else(|| failure.reason().to_string());
    let (kind, message) = match status {
        429 => (
            ErrorKind::RateLimited,
            format!("Rate limit exceeded. Please try again later. {detail}"),
        ),
        401 => (
            ErrorKind::Auth,
            format!("Authentication failed. Check your API key. {detail}"),
        ),
        404 => (ErrorKind::NotFound, format!("Resource not found. {detail}")),
        500.. => (ErrorKind::ServerError, format!("API error ({status}): {detail}")),
        _ => (ErrorKind::ClientError, format!("API error ({status}): {detail}")),
    };
    ApiError::new(kind, Some(status), message)
}

/// Extracts the `message` field of an error payload.
///
/// Validation errors report `message` as a list of strings; those are joined.
fn upstream_message(body: Option<&Value>) -> Option<String> {
    match body?.get("message")? {
        Value::String(message) if !message.trim().is_empty() => Some(message.clone()),
        Value::Array(parts) => {
            let parts: Vec<&str> = parts.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}
