//! JSON-RPC 2.0 messages and MCP result types.
//!
//! Messages are exchanged one per line. A request without an `id` is a
//! notification and never gets a response.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// JSON-RPC version carried by every message.
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// A JSON-RPC request or notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Must be `"2.0"`.
    pub jsonrpc: String,
    /// Method name.
    pub method: String,
    /// Method parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Request ID; absent on notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
}

impl Request {
    /// Returns `true` if no response is expected.
    #[must_use]
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC request ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric ID.
    Number(i64),
    /// String ID.
    String(String),
    /// Used when replying to a message whose ID could not be read.
    Null,
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// A JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Always `"2.0"`.
    pub jsonrpc: String,
    /// Result, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error, on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
    /// ID of the request this answers.
    pub id: RequestId,
}

impl Response {
    /// A successful response.
    #[must_use]
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// An error response.
    #[must_use]
    pub fn failure(id: RequestId, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error.into()),
            id,
        }
    }
}

/// The `error` member of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Error code.
    pub code: i32,
    /// Error message.
    pub message: String,
}

/// Protocol-level failures, with their standard JSON-RPC codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    /// The line was not valid JSON.
    #[error("Parse error: {0}")]
    Parse(String),
    /// The JSON was not a valid request object.
    #[error("Invalid Request: {0}")]
    InvalidRequest(String),
    /// No such method, or no such tool.
    #[error("Method not found: {0}")]
    MethodNotFound(String),
    /// The parameters did not fit the method.
    #[error("Invalid params: {0}")]
    InvalidParams(String),
    /// The server failed while handling the request.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RpcError {
    /// The JSON-RPC error code.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Parse(_) => -32700,
            Self::InvalidRequest(_) => -32600,
            Self::MethodNotFound(_) => -32601,
            Self::InvalidParams(_) => -32602,
            Self::Internal(_) => -32603,
        }
    }
}

impl From<RpcError> for ErrorObject {
    fn from(err: RpcError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Parses one line into a request.
///
/// # Errors
///
/// Returns [`RpcError::Parse`] for malformed JSON and
/// [`RpcError::InvalidRequest`] for JSON that is not a request.
pub fn parse_request(line: &str) -> std::result::Result<Request, RpcError> {
    let value: Value = serde_json::from_str(line).map_err(|e| RpcError::Parse(e.to_string()))?;
    let request: Request =
        serde_json::from_value(value).map_err(|e| RpcError::InvalidRequest(e.to_string()))?;

    if request.jsonrpc != JSONRPC_VERSION {
        return Err(RpcError::InvalidRequest(format!(
            "expected jsonrpc \"{JSONRPC_VERSION}\", got \"{}\"",
            request.jsonrpc
        )));
    }

    Ok(request)
}

/// A tool as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Tool name, e.g. `motion_get_task`.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema of the arguments.
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Creates a definition.
    pub fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// One block of tool output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Plain text.
    Text {
        /// The text.
        text: String,
    },
}

/// Result of `tools/call`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    /// Output blocks.
    pub content: Vec<ToolContent>,
    /// Set when the tool failed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl CallToolResult {
    /// A successful result holding `value` as pretty-printed JSON.
    #[must_use]
    pub fn json(value: &Value) -> Self {
        Self::text(
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
            false,
        )
    }

    /// A failed result holding `body` as pretty-printed JSON.
    #[must_use]
    pub fn error(body: &Value) -> Self {
        Self::text(
            serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string()),
            true,
        )
    }

    fn text(text: String, is_error: bool) -> Self {
        Self {
            content: vec![ToolContent::Text { text }],
            is_error,
        }
    }
}

/// Result of `initialize`.
#[must_use]
pub fn initialize_result(name: &str, version: &str) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": { "name": name, "version": version },
    })
}
