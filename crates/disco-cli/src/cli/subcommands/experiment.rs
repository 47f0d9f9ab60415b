use clap::Subcommand;
use disco_core::EntityId;
use disco_core::enums::ExperimentStatus;

/// Experiment commands. Experiments are addressed by `<PROBLEM_ID> <ID>`.
#[derive(Clone, Debug, Subcommand)]
pub enum ExperimentCommands {
    /// Propose an experiment for a problem.
    Add {
        problem_id: EntityId,
        proposal: String,
    },
    /// List experiments for a problem.
    List { problem_id: EntityId },
    /// List approved experiments for a problem.
    Approved { problem_id: EntityId },
    /// Get an experiment.
    Get { problem_id: EntityId, id: EntityId },
    /// Update any experiment field.
    Update {
        problem_id: EntityId,
        id: EntityId,
        #[arg(long)]
        proposal: Option<String>,
        #[arg(long)]
        approved: Option<bool>,
        /// not_started, in_progress, finished
        #[arg(long)]
        status: Option<ExperimentStatus>,
        /// Result link
        #[arg(long, conflicts_with = "clear_url")]
        url: Option<String>,
        /// Remove the result link
        #[arg(long)]
        clear_url: bool,
    },
    /// Approve an experiment proposal.
    Approve { problem_id: EntityId, id: EntityId },
    /// Withdraw approval from an experiment.
    Unapprove { problem_id: EntityId, id: EntityId },
    /// Move an experiment to IN PROGRESS.
    Start { problem_id: EntityId, id: EntityId },
    /// Move an experiment to FINISHED.
    Complete {
        problem_id: EntityId,
        id: EntityId,
        /// Result link; an existing link is kept when omitted
        #[arg(long)]
        url: Option<String>,
    },
    /// Delete an experiment.
    Delete { problem_id: EntityId, id: EntityId },
}
