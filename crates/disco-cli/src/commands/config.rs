use disco_config::DiscoConfig;

/// Handle `disco config`.
pub fn handle(config: &DiscoConfig) -> anyhow::Result<()> {
    print!("{}", render(config)?);
    Ok(())
}

fn render(config: &DiscoConfig) -> anyhow::Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
