//! Stdio server: framing, method dispatch, tool execution.

use disco_client::ApiClient;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::McpError;
use crate::protocol::{JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION, SERVER_NAME, ToolResult};
use crate::resources::{self, Resource};
use crate::tools::{self, ToolCall};

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Deserialize)]
struct ReadParams {
    uri: String,
}

fn params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, McpError> {
    serde_json::from_value(params.unwrap_or_else(|| json!({})))
        .map_err(|e| McpError::InvalidParams(e.to_string()))
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "subscribe": false, "listChanged": false },
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

/// MCP server bound to one API client.
pub struct McpServer {
    client: ApiClient,
}

impl McpServer {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    ///
    /// # Errors
    ///
    /// Returns `McpError::Io` if stdin or stdout fails.
    pub async fn serve_stdio(&self) -> Result<(), McpError> {
        tracing::info!(api = %self.client.base_url(), "disco mcp server running on stdio");
        self.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Read newline-delimited requests from `reader`, write one response line
    /// per request to `writer`. Notifications produce no output.
    ///
    /// # Errors
    ///
    /// Returns `McpError::Io` if reading or writing fails.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<(), McpError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let Some(response) = self.handle_line(&line).await else {
                continue;
            };
            match serde_json::to_string(&response) {
                Ok(frame) => {
                    writer.write_all(frame.as_bytes()).await?;
                    writer.write_all(b"\n").await?;
                    writer.flush().await?;
                }
                Err(e) => tracing::error!(error = %e, "failed to encode response"),
            }
        }
        tracing::info!("input closed, shutting down");
        Ok(())
    }

    /// Handle one raw frame. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    &McpError::Parse(e.to_string()),
                ));
            }
        };
        let raw_id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    raw_id,
                    &McpError::InvalidRequest(e.to_string()),
                ));
            }
        };
        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::failure(
                raw_id,
                &McpError::InvalidRequest(format!("unsupported jsonrpc version {}", request.jsonrpc)),
            ));
        }

        let notification = request.is_notification();
        let id = request.id.unwrap_or(Value::Null);
        tracing::debug!(method = %request.method, notification, "request");
        let outcome = self.dispatch(&request.method, request.params).await;

        if notification {
            if let Err(e) = outcome {
                tracing::debug!(error = %e, "notification ignored");
            }
            return None;
        }
        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                tracing::warn!(method = %request.method, error = %e, "request failed");
                JsonRpcResponse::failure(id, &e)
            }
        })
    }

    /// Route one method to its handler.
    ///
    /// # Errors
    ///
    /// Returns `MethodNotFound`, `InvalidParams`, `UnknownTool`,
    /// `UnknownResource`, or `Client` (resource reads only).
    pub async fn dispatch(&self, method: &str, raw: Option<Value>) -> Result<Value, McpError> {
        match method {
            "initialize" => Ok(initialize_result()),
            "notifications/initialized" | "notifications/cancelled" => Ok(Value::Null),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tools::catalog() })),
            "tools/call" => {
                let p: CallParams = params(raw)?;
                let result = self.call_tool(&p.name, p.arguments).await?;
                Ok(json!(result))
            }
            "resources/list" => Ok(resources::list()),
            "resources/templates/list" => Ok(resources::templates()),
            "resources/read" => {
                let p: ReadParams = params(raw)?;
                Resource::parse(&p.uri)?.read(&p.uri, &self.client).await
            }
            other => Err(McpError::MethodNotFound(other.to_string())),
        }
    }

    /// Run one tool. API failures become an `isError` result whose text
    /// carries the upstream status code.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTool` or `InvalidParams` before any REST call is made.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolResult, McpError> {
        let call = ToolCall::parse(name, arguments)?;
        tracing::info!(tool = name, "tool call");
        Ok(match call.execute(&self.client).await {
            Ok(text) => ToolResult::ok(text),
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "tool call failed");
                ToolResult::error(format!("Error: {e}"))
            }
        })
    }
}
