use disco_core::updates::ResearchUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ResearchCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `disco research`.
pub async fn handle(
    action: ResearchCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = &ctx.client;
    match action {
        ResearchCommands::Add {
            problem_id,
            content,
        } => output(&client.add_research(problem_id, &content).await?, flags.format),
        ResearchCommands::List { problem_id } => {
            output(&client.list_research(problem_id).await?, flags.format)
        }
        ResearchCommands::Approved { problem_id } => output(
            &client.list_approved_research(problem_id).await?,
            flags.format,
        ),
        ResearchCommands::Get { problem_id, id } => {
            output(&client.get_research(problem_id, id).await?, flags.format)
        }
        ResearchCommands::Update {
            problem_id,
            id,
            content,
        } => {
            let update = ResearchUpdateBuilder::new().content(content).build();
            output(
                &client.update_research(problem_id, id, &update).await?,
                flags.format,
            )
        }
        ResearchCommands::Approve { problem_id, id } => output(
            &client.set_research_approval(problem_id, id, true).await?,
            flags.format,
        ),
        ResearchCommands::Unapprove { problem_id, id } => output(
            &client.set_research_approval(problem_id, id, false).await?,
            flags.format,
        ),
        ResearchCommands::Delete { problem_id, id } => {
            output(&client.delete_research(problem_id, id).await?, flags.format)
        }
    }
}
