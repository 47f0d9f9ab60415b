//! Adapter error types and their JSON-RPC codes.

use disco_client::ClientError;
use thiserror::Error;

/// Errors raised while handling one JSON-RPC message.
///
/// Failures of the REST call behind a tool are not `McpError`s: they are
/// reported inside the tool result with `isError: true` so the agent can
/// read them.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("method not found: {0}")]
    MethodNotFound(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("unknown resource: {0}")]
    UnknownResource(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl McpError {
    /// JSON-RPC error code for this error.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Parse(_) => -32700,
            Self::InvalidRequest(_) => -32600,
            Self::MethodNotFound(_) => -32601,
            Self::InvalidParams(_) | Self::UnknownTool(_) => -32602,
            Self::UnknownResource(_) => -32002,
            Self::Client(_) | Self::Io(_) => -32603,
        }
    }
}
