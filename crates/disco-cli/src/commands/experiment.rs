use disco_core::enums::ExperimentStatus;
use disco_core::updates::{ExperimentUpdate, ExperimentUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ExperimentCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `disco experiment`.
pub async fn handle(
    action: ExperimentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = &ctx.client;
    match action {
        ExperimentCommands::Add {
            problem_id,
            proposal,
        } => output(
            &client.add_experiment(problem_id, &proposal).await?,
            flags.format,
        ),
        ExperimentCommands::List { problem_id } => {
            output(&client.list_experiments(problem_id).await?, flags.format)
        }
        ExperimentCommands::Approved { problem_id } => output(
            &client.list_approved_experiments(problem_id).await?,
            flags.format,
        ),
        ExperimentCommands::Get { problem_id, id } => {
            output(&client.get_experiment(problem_id, id).await?, flags.format)
        }
        ExperimentCommands::Update {
            problem_id,
            id,
            proposal,
            approved,
            status,
            url,
            clear_url,
        } => {
            let update = build_update(proposal, approved, status, url, clear_url);
            if update.is_empty() {
                tracing::warn!(problem_id, id, "no fields to update; showing current state");
            }
            output(
                &client.update_experiment(problem_id, id, &update).await?,
                flags.format,
            )
        }
        ExperimentCommands::Approve { problem_id, id } => {
            let update = ExperimentUpdateBuilder::new().is_approved(true).build();
            output(
                &client.update_experiment(problem_id, id, &update).await?,
                flags.format,
            )
        }
        ExperimentCommands::Unapprove { problem_id, id } => {
            let update = ExperimentUpdateBuilder::new().is_approved(false).build();
            output(
                &client.update_experiment(problem_id, id, &update).await?,
                flags.format,
            )
        }
        ExperimentCommands::Start { problem_id, id } => {
            output(&client.start_experiment(problem_id, id).await?, flags.format)
        }
        ExperimentCommands::Complete {
            problem_id,
            id,
            url,
        } => output(
            &client.complete_experiment(problem_id, id, url).await?,
            flags.format,
        ),
        ExperimentCommands::Delete { problem_id, id } => output(
            &client.delete_experiment(problem_id, id).await?,
            flags.format,
        ),
    }
}

fn build_update(
    proposal: Option<String>,
    approved: Option<bool>,
    status: Option<ExperimentStatus>,
    url: Option<String>,
    clear_url: bool,
) -> ExperimentUpdate {
    let mut builder = ExperimentUpdateBuilder::new();
    if let Some(proposal) = proposal {
        builder = builder.proposal(proposal);
    }
    if let Some(approved) = approved {
        builder = builder.is_approved(approved);
    }
    if let Some(status) = status {
        builder = builder.status(status);
    }
    if clear_url {
        builder = builder.url(None);
    } else if url.is_some() {
        builder = builder.url(url);
    }
    builder.build()
}
