use disco_core::updates::{ProblemUpdate, ProblemUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProblemCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `disco problem`.
pub async fn handle(
    action: ProblemCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = &ctx.client;
    match action {
        ProblemCommands::Create { brief } => {
            output(&client.create_problem(&brief).await?, flags.format)
        }
        ProblemCommands::List => output(&client.list_problems().await?, flags.format),
        ProblemCommands::Investigate => {
            output(&client.list_investigate_problems().await?, flags.format)
        }
        ProblemCommands::Get { id } => output(&client.get_problem(id).await?, flags.format),
        ProblemCommands::Update {
            id,
            brief,
            investigate,
            related,
            clear_related,
        } => {
            let update = build_update(brief, investigate, related, clear_related);
            if update.is_empty() {
                tracing::warn!(id, "no fields to update; showing current state");
            }
            output(&client.update_problem(id, &update).await?, flags.format)
        }
        ProblemCommands::Delete { id } => {
            output(&client.delete_problem(id).await?, flags.format)
        }
    }
}

fn build_update(
    brief: Option<String>,
    investigate: Option<bool>,
    related: Vec<String>,
    clear_related: bool,
) -> ProblemUpdate {
    let mut builder = ProblemUpdateBuilder::new();
    if let Some(brief) = brief {
        builder = builder.brief(brief);
    }
    if let Some(flag) = investigate {
        builder = builder.is_investigate(flag);
    }
    if clear_related {
        builder = builder.related_experiments(Vec::new());
    } else if !related.is_empty() {
        builder = builder.related_experiments(related);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::build_update;

    #[test]
    fn only_given_fields_are_set() {
        let update = build_update(None, Some(true), Vec::new(), false);
        assert_eq!(update.brief, None);
        assert_eq!(update.is_investigate, Some(true));
        assert_eq!(update.related_experiments, None);
    }

    #[test]
    fn clear_related_sends_empty_list() {
        let update = build_update(None, None, Vec::new(), true);
        assert_eq!(update.related_experiments, Some(Vec::new()));
    }

    #[test]
    fn related_labels_replace_list() {
        let update = build_update(
            Some("Churn".into()),
            None,
            vec!["pricing-page".into(), "onboarding".into()],
            false,
        );
        assert_eq!(update.brief.as_deref(), Some("Churn"));
        assert_eq!(
            update.related_experiments,
            Some(vec!["pricing-page".to_string(), "onboarding".to_string()])
        );
    }

    #[test]
    fn no_flags_is_empty_update() {
        assert!(build_update(None, None, Vec::new(), false).is_empty());
    }
}
