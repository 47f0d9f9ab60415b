use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::EntityId;
use crate::enums::ExperimentStatus;

/// A proposed or executed test attached to a problem.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    pub id: EntityId,
    pub problem_id: EntityId,
    pub proposal: String,
    /// Human gate before an agent may start work.
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub status: ExperimentStatus,
    /// Result link, normally set once the experiment is finished.
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
