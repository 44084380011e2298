//! MCP tool server for the motion application.
//!
//! This crate exposes the Motion API as Model Context Protocol tools. It
//! speaks JSON-RPC 2.0, one message per line, over any async reader and
//! writer (stdin and stdout in the binary).
//!
//! - [`protocol`]: JSON-RPC messages and MCP result types
//! - [`server`]: the request loop ([`McpServer`]) and the [`ToolHandler`] seam
//! - [`tools`]: the Motion tool set ([`MotionTools`])
//! - [`error`]: server and tool errors
//!
//! Tool failures do not fail the JSON-RPC call. They come back as a result
//! flagged `isError` whose text is a JSON object:
//!
//! ```json
//! { "error": "Resource not found. Task not found", "kind": "not_found", "retryable": false }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use motion_api::{ClientSettings, MotionClient};
//! use motion_mcp::{McpServer, MotionTools};
//! use secrecy::SecretString;
//! use tokio::io::BufReader;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ClientSettings::new(SecretString::from("key".to_string()));
//! let server = McpServer::new(MotionTools::new(MotionClient::new(settings)?));
//! server
//!     .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

// Re-export primary types at crate root for convenience
pub use error::{Error, Result, ToolError};
pub use protocol::{CallToolResult, Request, RequestId, Response, RpcError, ToolDefinition};
pub use server::{McpServer, SERVER_NAME, SERVER_VERSION, ToolHandler};
pub use tools::{MotionTools, definitions};
