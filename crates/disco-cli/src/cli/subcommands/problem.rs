use clap::Subcommand;
use disco_core::EntityId;

/// Problem commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProblemCommands {
    /// Create a problem from a short brief.
    Create { brief: String },
    /// List all problems, newest first.
    List,
    /// List problems flagged for investigation.
    Investigate,
    /// Get a problem with its research and experiments.
    Get { id: EntityId },
    /// Update a problem.
    Update {
        id: EntityId,
        #[arg(long)]
        brief: Option<String>,
        /// Flag (true) or unflag (false) for investigation
        #[arg(long)]
        investigate: Option<bool>,
        /// Replace the related experiment labels (comma separated)
        #[arg(long, value_delimiter = ',', conflicts_with = "clear_related")]
        related: Vec<String>,
        /// Remove all related experiment labels
        #[arg(long)]
        clear_related: bool,
    },
    /// Delete a problem and everything attached to it.
    Delete { id: EntityId },
}
