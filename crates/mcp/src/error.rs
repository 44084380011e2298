//! Error types for the MCP server.
//!
//! [`ToolError`] is what a tool call can fail with; it is reported back to
//! the caller inside the tool result. [`Error`] covers failures of the
//! server loop itself, which end the session.

use motion_api::ErrorKind;
use motion_protocol::ProtocolError;
use serde_json::{Value, json};

/// Errors that can occur while running the server loop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading from or writing to the client failed.
    #[error("I/O error on the protocol channel: {0}")]
    Io(#[from] std::io::Error),

    /// A response could not be encoded.
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A specialized Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while executing a tool.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The arguments did not match the tool's input schema.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The arguments parsed but failed validation.
    #[error("invalid arguments: {0}")]
    Validation(#[from] ProtocolError),

    /// No tool has this name.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The Motion API call failed.
    #[error(transparent)]
    Api(#[from] motion_api::Error),

    /// The tool output could not be encoded as JSON.
    #[error("failed to encode tool output: {0}")]
    Output(#[source] serde_json::Error),
}

impl ToolError {
    /// Shorthand for [`ToolError::InvalidArguments`].
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArguments(reason.into())
    }

    /// A stable identifier callers can branch on.
    ///
    /// API failures report their [`ErrorKind`]; anything else around the
    /// call (a reply that did not decode, for instance) reports `internal`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArguments(_) | Self::Validation(_) => "invalid_arguments",
            Self::UnknownTool(_) => "unknown_tool",
            Self::Api(err) => err.kind().map_or("internal", ErrorKind::as_str),
            Self::Output(_) => "internal",
        }
    }

    /// Returns `true` if the same call may succeed later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(err) => err.kind().is_some_and(ErrorKind::is_retryable),
            _ => false,
        }
    }

    /// The JSON body reported to the caller.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "retryable": self.is_retryable(),
        })
    }
}
