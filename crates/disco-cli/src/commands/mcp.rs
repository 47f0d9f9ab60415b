use anyhow::Context;
use disco_client::ApiClient;
use disco_config::DiscoConfig;
use disco_mcp::McpServer;

/// Handle `disco mcp`. Runs until stdin closes.
pub async fn handle(config: &DiscoConfig) -> anyhow::Result<()> {
    let client = ApiClient::new(&config.client).context("failed to build disco API client")?;
    tracing::info!(api = %client.base_url(), "MCP adapter listening on stdio");
    McpServer::new(client).serve_stdio().await?;
    Ok(())
}
