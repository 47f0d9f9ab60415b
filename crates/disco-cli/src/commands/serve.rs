use anyhow::Context;
use disco_config::DiscoConfig;

use crate::cli::root_commands::ServeArgs;

/// Handle `disco serve`.
pub async fn handle(args: &ServeArgs, config: DiscoConfig) -> anyhow::Result<()> {
    let config = apply_overrides(args, config);
    config.validate().context("invalid server configuration")?;

    tracing::debug!(
        bind = %config.server.bind,
        database = %config.database.path,
        strict = config.workflow.strict_transitions,
        "starting disco API"
    );
    disco_api::serve(&config).await?;
    Ok(())
}

fn apply_overrides(args: &ServeArgs, mut config: DiscoConfig) -> DiscoConfig {
    if let Some(bind) = &args.bind {
        config.server.bind.clone_from(bind);
    }
    if let Some(database) = &args.database {
        config.database.path.clone_from(database);
    }
    if args.strict {
        config.workflow.strict_transitions = true;
    }
    config
}

#[cfg(test)]
mod tests {
    use disco_config::DiscoConfig;
    use pretty_assertions::assert_eq;

    use super::apply_overrides;
    use crate::cli::root_commands::ServeArgs;

    #[test]
    fn flags_override_config() {
        let args = ServeArgs {
            bind: Some("0.0.0.0:8080".into()),
            database: Some(":memory:".into()),
            strict: true,
        };
        let config = apply_overrides(&args, DiscoConfig::default());
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.database.path, ":memory:");
        assert!(config.workflow.strict_transitions);
    }

    #[test]
    fn absent_flags_keep_config() {
        let mut base = DiscoConfig::default();
        base.workflow.strict_transitions = true;
        let expected_bind = base.server.bind.clone();

        let config = apply_overrides(&ServeArgs::default(), base);
        assert_eq!(config.server.bind, expected_bind);
        assert!(config.workflow.strict_transitions);
    }
}
