use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Experiment, Research};
use crate::EntityId;

/// A tracked product or design problem. Root aggregate: owns its research
/// findings and experiments.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: EntityId,
    pub brief: String,
    /// Promoted for active research by an agent.
    #[serde(default)]
    pub is_investigate: bool,
    #[serde(default)]
    pub related_experiments: Vec<String>,
    /// Owned findings, ordered by creation.
    #[serde(default)]
    pub research: Vec<Research>,
    /// Owned experiments, ordered by creation.
    #[serde(default)]
    pub experiments: Vec<Experiment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Problem {
    /// Approved findings only. Agents may act on these.
    pub fn approved_research(&self) -> impl Iterator<Item = &Research> {
        self.research.iter().filter(|r| r.is_approved)
    }

    /// Approved experiments only.
    pub fn approved_experiments(&self) -> impl Iterator<Item = &Experiment> {
        self.experiments.iter().filter(|e| e.is_approved)
    }
}
