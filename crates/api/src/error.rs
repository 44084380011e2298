//! Error types for Motion API operations.
//!
//! Every failed call is reduced to an [`ApiError`] carrying an explicit
//! [`ErrorKind`], so callers branch on the kind instead of parsing message
//! text. [`Error`] wraps it together with the failures that can happen
//! around a call (building the client, encoding a body, decoding a reply).

use std::fmt;

/// Why a call to the Motion API failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The API key was rejected (HTTP 401).
    Auth,
    /// The resource does not exist (HTTP 404).
    NotFound,
    /// The account quota was exceeded (HTTP 429).
    RateLimited,
    /// The request was rejected (any other 4xx).
    ClientError,
    /// The API failed to handle the request (5xx).
    ServerError,
    /// No response was received (connection failure, timeout).
    Network,
}

impl ErrorKind {
    /// Returns `true` if a call failing this way may succeed when repeated.
    ///
    /// # Examples
    ///
    /// ```
    /// use motion_api::ErrorKind;
    ///
    /// assert!(ErrorKind::RateLimited.is_retryable());
    /// assert!(!ErrorKind::NotFound.is_retryable());
    /// ```
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::RateLimited | Self::ServerError | Self::Network)
    }

    /// Returns a stable snake_case identifier for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
            Self::Network => "network",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure of a single API call.
///
/// Built by [`classify`](crate::classify::classify) from a transport
/// failure and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    status: Option<u16>,
    message: String,
}

impl ApiError {
    /// Creates a classified error.
    #[must_use]
    pub fn new(kind: ErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    /// The failure kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The HTTP status, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// The human-readable explanation.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Shorthand for `self.kind().is_retryable()`.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Errors that can occur during Motion API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// The configured base URL is unusable.
    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The API key cannot be sent as an HTTP header.
    #[error("API key contains characters that are not allowed in an HTTP header")]
    InvalidApiKey,

    /// A request body could not be encoded as JSON.
    #[error("failed to encode request body for {path}: {source}")]
    Encode {
        /// The request path.
        path: String,
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A successful response did not match the expected type.
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        /// The request path.
        path: String,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A list response had an unexpected shape.
    #[error("unexpected list response from {path}: {source}")]
    Payload {
        /// The request path.
        path: String,
        /// The underlying protocol error.
        #[source]
        source: motion_protocol::ProtocolError,
    },
}

impl Error {
    /// Returns the API failure kind, if this error came from the API.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Api(err) => Some(err.kind()),
            _ => None,
        }
    }
}

/// A specialized Result type for Motion API operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_kinds() {
        let retryable: Vec<_> = [
            ErrorKind::Auth,
            ErrorKind::NotFound,
            ErrorKind::RateLimited,
            ErrorKind::ClientError,
            ErrorKind::ServerError,
            ErrorKind::Network,
        ]
        .into_iter()
        .filter(|k| k.is_retryable())
        .collect();
        assert_eq!(
            retryable,
            vec![
                ErrorKind::RateLimited,
                ErrorKind::ServerError,
                ErrorKind::Network
            ]
        );
    }

    #[test]
    fn api_error_displays_message() {
        let err = ApiError::new(ErrorKind::NotFound, Some(404), "Resource not found. gone");
        assert_eq!(err.to_string(), "Resource not found. gone");
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_retryable());
    }

    #[test]
    fn error_kind_is_inspectable() {
        let err = Error::from(ApiError::new(ErrorKind::RateLimited, Some(429), "slow down"));
        assert_eq!(err.kind(), Some(ErrorKind::RateLimited));
        assert_eq!(err.to_string(), "slow down");

        let err = Error::InvalidApiKey;
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn error_display_invalid_base_url() {
        let err = Error::InvalidBaseUrl {
            url: "ftp://x".to_string(),
            reason: "scheme must be http or https".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid base URL \"ftp://x\": scheme must be http or https"
        );
    }
}
