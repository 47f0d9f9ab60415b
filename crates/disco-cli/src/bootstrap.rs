use std::path::PathBuf;

use anyhow::Context;
use disco_config::DiscoConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then layered config, then apply global flag overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<DiscoConfig> {
    load_dotenv()?;

    let mut config = DiscoConfig::load().context("failed to load disco configuration")?;
    if let Some(api_url) = &flags.api_url {
        config.client.base_url.clone_from(api_url);
        config
            .validate()
            .context("invalid --api-url / DISCO_API_URL value")?;
    }
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    check_dotenv(dotenvy::dotenv())
}

/// A missing `.env` is fine; any other dotenv failure is surfaced.
fn check_dotenv(result: Result<PathBuf, dotenvy::Error>) -> anyhow::Result<()> {
    match result {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded dotenv file");
            Ok(())
        }
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(error).context("failed to load .env file"),
    }
}
