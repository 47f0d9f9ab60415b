use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed client command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Problem { action } => commands::problem::handle(action, ctx, flags).await,
        Commands::Research { action } => commands::research::handle(action, ctx, flags).await,
        Commands::Experiment { action } => commands::experiment::handle(action, ctx, flags).await,
        Commands::Serve(_) | Commands::Mcp | Commands::Config => {
            unreachable!("serve/mcp/config are pre-dispatched in main")
        }
    }
}
