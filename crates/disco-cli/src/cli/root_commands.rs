use clap::{Args, Subcommand};

use crate::cli::subcommands::{ExperimentCommands, ProblemCommands, ResearchCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the REST API server.
    Serve(ServeArgs),
    /// Run the MCP agent-tool adapter over stdio.
    Mcp,
    /// Print the effective configuration as TOML.
    Config,
    /// Problems under investigation.
    Problem {
        #[command(subcommand)]
        action: ProblemCommands,
    },
    /// Research items attached to a problem.
    Research {
        #[command(subcommand)]
        action: ResearchCommands,
    },
    /// Experiments attached to a problem.
    Experiment {
        #[command(subcommand)]
        action: ExperimentCommands,
    },
}

/// Overrides for `server.*` and `database.*` config when serving.
#[derive(Clone, Debug, Default, Args)]
pub struct ServeArgs {
    /// Socket address to bind (example: 0.0.0.0:3000)
    #[arg(long)]
    pub bind: Option<String>,

    /// Path to the database file, or `:memory:`
    #[arg(long)]
    pub database: Option<String>,

    /// Enforce NOT STARTED -> IN PROGRESS -> FINISHED
    #[arg(long)]
    pub strict: bool,
}
