//! The MCP server loop.
//!
//! Reads line-delimited JSON-RPC from any [`AsyncBufRead`], dispatches each
//! request on its own task, and writes one response line per request to any
//! [`AsyncWrite`]. The binary wires it to stdin and stdout.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{Result, ToolError};
use crate::protocol::{
    self, CallToolResult, Request, RequestId, Response, RpcError, ToolDefinition,
};

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "motion-mcp-server";

/// Version reported in `serverInfo`.
pub const SERVER_VERSION: &str = "0.1.0";

/// Executes tools on behalf of the server.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Every tool this handler serves.
    fn tools(&self) -> Vec<ToolDefinition>;

    /// Runs the tool called `name` and returns its JSON output.
    async fn call(&self, name: &str, arguments: Value) -> std::result::Result<Value, ToolError>;
}

/// A JSON-RPC server exposing a [`ToolHandler`] over MCP.
///
/// Cloning is cheap; clones share the handler.
#[derive(Debug)]
pub struct McpServer<H> {
    handler: Arc<H>,
}

impl<H> Clone for McpServer<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H: ToolHandler + 'static> McpServer<H> {
    /// Creates a server around `handler`.
    pub fn new(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// The tool handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Serves requests until `reader` reaches end of input.
    ///
    /// Each request is handled on its own task, so a tool call waiting for
    /// rate-limit admission or a retry does not hold up other requests.
    /// Responses are written as they complete; clients match them by `id`.
    /// Requests still in flight at end of input are answered before
    /// returning.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing the channel fails. Malformed
    /// messages are answered with JSON-RPC errors and do not stop the loop.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("MCP server listening");
        let mut lines = reader.lines();
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let server = self.clone();
                    let line = line.to_string();
                    in_flight.spawn(async move { server.handle_message(&line).await });
                }
                Some(done) = in_flight.join_next(), if !in_flight.is_empty() => {
                    write_response(&mut writer, done).await?;
                }
            }
        }

        debug!(pending = in_flight.len(), "end of input, draining requests");
        while let Some(done) = in_flight.join_next().await {
            write_response(&mut writer, done).await?;
        }

        info!("end of input, shutting down");
        Ok(())
    }

    /// Handles one message, returning the response to send, if any.
    pub async fn handle_message(&self, line: &str) -> Option<Response> {
        match protocol::parse_request(line) {
            Ok(request) => self.handle_request(request).await,
            Err(err) => {
                warn!(error = %err, "rejected malformed message");
                Some(Response::failure(RequestId::Null, err))
            }
        }
    }

    /// Handles a parsed request. Notifications yield `None`.
    #[instrument(skip_all, fields(method = %request.method))]
    pub async fn handle_request(&self, request: Request) -> Option<Response> {
        let Some(id) = request.id else {
            debug!("notification received");
            return None;
        };
        let params = request.params.unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => {
                info!("client initialized session");
                Response::success(id, protocol::initialize_result(SERVER_NAME, SERVER_VERSION))
            }
            "ping" => Response::success(id, json!({})),
            "tools/list" => Response::success(id, json!({ "tools": self.handler.tools() })),
            "tools/call" => self.call_tool(id, params).await,
            other => Response::failure(id, RpcError::MethodNotFound(other.to_string())),
        };
        Some(response)
    }

    async fn call_tool(&self, id: RequestId, params: Value) -> Response {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return Response::failure(
                id,
                RpcError::InvalidParams("missing tool name".to_string()),
            );
        };

        let arguments = match params.get("arguments") {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(args) => args.clone(),
        };

        debug!(tool = name, "calling tool");
        let result = match self.handler.call(name, arguments).await {
            Ok(value) => CallToolResult::json(&value),
            Err(ToolError::UnknownTool(name)) => {
                return Response::failure(id, RpcError::MethodNotFound(format!("tool {name}")));
            }
            Err(err) => {
                warn!(tool = name, kind = err.kind(), error = %err, "tool failed");
                CallToolResult::error(&err.to_json())
            }
        };

        match serde_json::to_value(result) {
            Ok(value) => Response::success(id, value),
            Err(err) => Response::failure(id, RpcError::Internal(err.to_string())),
        }
    }
}

async fn write_response<W>(
    writer: &mut W,
    done: std::result::Result<Option<Response>, JoinError>,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response = match done {
        Ok(Some(response)) => response,
        Ok(None) => return Ok(()),
        Err(err) => {
            // The request's id is lost with its task; nothing can be answered.
            error!(error = %err, "request handler did not complete");
            return Ok(());
        }
    };

    let mut encoded = serde_json::to_string(&response)?;
    encoded.push('\n');
    writer.write_all(encoded.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    struct EchoHandler;

    #[async_trait]
    impl ToolHandler for EchoHandler {
        fn tools(&self) -> Vec<ToolDefinition> {
            vec![ToolDefinition::new(
                "echo",
                "Returns its arguments",
                json!({"type": "object"}),
            )]
        }

        async fn call(&self, name: &str, arguments: Value) -> std::result::Result<Value, ToolError> {
            match name {
                "slow_echo" => {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok(arguments)
                }
                "echo" if arguments.get("fail").is_some() => {
                    Err(ToolError::invalid("fail was set"))
                }
                "echo" => Ok(arguments),
                other => Err(ToolError::UnknownTool(other.to_string())),
            }
        }
    }

    async fn send(server: &McpServer<EchoHandler>, line: &str) -> Option<Value> {
        server
            .handle_message(line)
            .await
            .map(|r| serde_json::to_value(r).unwrap())
    }

    #[tokio::test]
    async fn initialize_reports_server_info() {
        let server = McpServer::new(EchoHandler);
        let reply = send(
            &server,
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        )
        .await
        .unwrap();
        assert_eq!(reply["result"]["serverInfo"]["name"], "motion-mcp-server");
        assert_eq!(reply["result"]["protocolVersion"], "2024-11-05");
        assert!(reply["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn notifications_get_no_reply() {
        let server = McpServer::new(EchoHandler);
        assert!(
            send(&server, r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn tools_list() {
        let server = McpServer::new(EchoHandler);
        let reply = send(&server, r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();
        assert_eq!(reply["result"]["tools"][0]["name"], "echo");
        assert_eq!(reply["result"]["tools"][0]["inputSchema"]["type"], "object");
    }

    #[tokio::test]
    async fn tools_call_success_and_failure() {
        let server = McpServer::new(EchoHandler);
        let reply = send(
            &server,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"echo","arguments":{"x":1}}}"#,
        )
        .await
        .unwrap();
        let text = reply["result"]["content"][0]["text"].as_str().unwrap();
        assert_eq!(serde_json::from_str::<Value>(text).unwrap(), json!({"x": 1}));
        assert!(reply["result"].get("isError").is_none());

        let reply = send(
            &server,
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"echo","arguments":{"fail":true}}}"#,
        )
        .await
        .unwrap();
        assert_eq!(reply["result"]["isError"], true);
        let text = reply["result"]["content"][0]["text"].as_str().unwrap();
        let body: Value = serde_json::from_str(text).unwrap();
        assert_eq!(body["kind"], "invalid_arguments");
        assert_eq!(body["retryable"], false);
    }

    #[tokio::test]
    async fn missing_arguments_default_to_empty_object() {
        let server = McpServer::new(EchoHandler);
        let reply = send(
            &server,
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"echo"}}"#,
        )
        .await
        .unwrap();
        let text = reply["result"]["content"][0]["text"].as_str().unwrap();
        assert_eq!(serde_json::from_str::<Value>(text).unwrap(), json!({}));
    }

    #[tokio::test]
    async fn unknown_tool_and_method() {
        let server = McpServer::new(EchoHandler);
        let reply = send(
            &server,
            r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"nope"}}"#,
        )
        .await
        .unwrap();
        assert_eq!(reply["error"]["code"], -32601);

        let reply = send(&server, r#"{"jsonrpc":"2.0","id":7,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(reply["error"]["code"], -32601);

        let reply = send(
            &server,
            r#"{"jsonrpc":"2.0","id":8,"method":"tools/call","params":{}}"#,
        )
        .await
        .unwrap();
        assert_eq!(reply["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn malformed_json_answers_with_null_id() {
        let server = McpServer::new(EchoHandler);
        let reply = send(&server, "{oops").await.unwrap();
        assert_eq!(reply["error"]["code"], -32700);
        assert!(reply["id"].is_null());
    }

    #[tokio::test]
    async fn serve_writes_one_line_per_request() {
        let server = McpServer::new(EchoHandler);
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n",
        );
        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let mut lines = output_lines(output);
        assert_eq!(lines.len(), 2);
        lines.sort_by_key(|line| line["id"].as_i64());
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1], json!({"jsonrpc": "2.0", "result": {}, "id": 2}));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_call_does_not_hold_up_later_requests() {
        let server = McpServer::new(EchoHandler);
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"slow_echo","arguments":{"x":1}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"echo","arguments":{"fail":true}}}"#,
            "\n",
        );
        let start = tokio::time::Instant::now();
        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let lines = output_lines(output);
        let ids: Vec<i64> = lines.iter().map(|l| l["id"].as_i64().unwrap()).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[2], 1, "slow call answered last: {ids:?}");
        assert_eq!(lines[2]["result"]["isError"], Value::Null);
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    fn output_lines(output: Vec<u8>) -> Vec<Value> {
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }
}
