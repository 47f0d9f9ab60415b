use clap::Subcommand;
use disco_core::EntityId;

/// Research commands. Items are addressed by `<PROBLEM_ID> <ID>`.
#[derive(Clone, Debug, Subcommand)]
pub enum ResearchCommands {
    /// Attach a research item to a problem.
    Add { problem_id: EntityId, content: String },
    /// List research for a problem.
    List { problem_id: EntityId },
    /// List approved research for a problem.
    Approved { problem_id: EntityId },
    /// Get a research item.
    Get { problem_id: EntityId, id: EntityId },
    /// Edit research content.
    Update {
        problem_id: EntityId,
        id: EntityId,
        #[arg(long)]
        content: String,
    },
    /// Mark a research item as approved.
    Approve { problem_id: EntityId, id: EntityId },
    /// Withdraw approval from a research item.
    Unapprove { problem_id: EntityId, id: EntityId },
    /// Delete a research item.
    Delete { problem_id: EntityId, id: EntityId },
}
