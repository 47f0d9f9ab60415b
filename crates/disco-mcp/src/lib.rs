//! # disco-mcp
//!
//! Agent-tool adapter for Disco, speaking the Model Context Protocol
//! (JSON-RPC 2.0, newline-delimited over stdio).
//!
//! The adapter is a stateless passthrough: every tool call and resource read
//! becomes exactly one REST call through [`disco_client::ApiClient`]. Nothing
//! is cached, so approval state a human changes in between two agent calls is
//! always read fresh.
//!
//! Stdout carries protocol frames only; logs go to stderr.

pub mod error;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod summary;
pub mod tools;

pub use error::McpError;
pub use server::McpServer;
