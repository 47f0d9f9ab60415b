//! # disco-client
//!
//! Typed HTTP client for the Disco REST API.
//!
//! One method per REST call, grouped by resource:
//! - problems: create, list, investigate list, get, update, delete
//! - research: add, list, approved list, get, update, approve, delete
//! - experiments: add, list, approved list, get, update, start, complete, delete
//!
//! The client holds no state beyond the base URL and connection pool; every
//! call goes to the API.

pub mod experiments;
pub mod problems;
pub mod research;

mod error;
mod http;

pub use error::ClientError;

use disco_config::ClientConfig;
use disco_core::responses::HealthResponse;

/// HTTP client bound to one Disco API base URL.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration (base URL and request timeout).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("disco/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API is unreachable or unhealthy.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get_json("/health").await
    }
}
