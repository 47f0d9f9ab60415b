use disco_client::{ApiClient, ClientError};
use disco_config::DiscoConfig;

/// Shared resources for client commands.
pub struct AppContext {
    pub client: ApiClient,
}

impl AppContext {
    pub fn init(config: &DiscoConfig) -> Result<Self, ClientError> {
        let client = ApiClient::new(&config.client)?;
        tracing::debug!(
            api = %client.base_url(),
            timeout_secs = config.client.timeout_secs,
            "API client ready"
        );
        Ok(Self { client })
    }
}
