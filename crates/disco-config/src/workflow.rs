//! Workflow policy configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Reject experiment status changes that skip or reverse the
    /// `NOT STARTED -> IN PROGRESS -> FINISHED` path.
    #[serde(default)]
    pub strict_transitions: bool,
}
