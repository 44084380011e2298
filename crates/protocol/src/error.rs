//! Error types for the motion-protocol crate.
//!
//! This module defines the errors that can occur when decoding API payloads
//! into protocol types or validating parameters before they are sent.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Failed to deserialize a protocol type from JSON.
    #[error("failed to deserialize from JSON: {0}")]
    DeserializationFailed(#[source] serde_json::Error),

    /// A list response had neither an array nor an object shape.
    #[error("unexpected list response shape: expected an array or an object with \"{key}\"")]
    UnexpectedListShape {
        /// The collection key that was looked up.
        key: String,
    },

    /// A required field was missing or empty.
    #[error("{field} is required and cannot be empty")]
    MissingField {
        /// The field name, as it appears on the wire.
        field: &'static str,
    },

    /// A field had a value outside of what the API accepts.
    #[error("invalid value for {field}: {reason}")]
    InvalidField {
        /// The field name, as it appears on the wire.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ProtocolError {
    /// Returns a [`ProtocolError::MissingField`] if `value` is empty or blank.
    pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Self::MissingField { field });
        }
        Ok(())
    }
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ProtocolError::MissingField { field: "workspaceId" };
        assert_eq!(err.to_string(), "workspaceId is required and cannot be empty");

        let err = ProtocolError::UnexpectedListShape {
            key: "tasks".to_string(),
        };
        assert!(err.to_string().contains("\"tasks\""));
    }

    #[test]
    fn require_rejects_blank_values() {
        assert!(ProtocolError::require("name", "task").is_ok());
        assert!(ProtocolError::require("name", "").is_err());
        assert!(ProtocolError::require("name", "   ").is_err());
    }
}
