pub mod config;
pub mod dispatch;
pub mod experiment;
pub mod mcp;
pub mod problem;
pub mod research;
pub mod serve;
