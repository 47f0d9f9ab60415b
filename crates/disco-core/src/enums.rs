//! Status enums and entity kinds for Disco.
//!
//! `ExperimentStatus` serializes with the literal workflow labels
//! (`"NOT STARTED"`, `"IN PROGRESS"`, `"FINISHED"`). The same strings are
//! stored in SQL, so `as_str()` and the serde names must stay in sync.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ExperimentStatus
// ---------------------------------------------------------------------------

/// Status of an experiment through its execution lifecycle.
///
/// ```text
/// NOT STARTED → IN PROGRESS → FINISHED
/// ```
///
/// There is no reverse transition. Whether the path is enforced is a
/// deployment choice (`workflow.strict_transitions`); by default any status
/// may follow any other.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum ExperimentStatus {
    #[default]
    #[serde(rename = "NOT STARTED")]
    NotStarted,
    #[serde(rename = "IN PROGRESS")]
    InProgress,
    #[serde(rename = "FINISHED")]
    Finished,
}

impl ExperimentStatus {
    pub const ALL: [Self; 3] = [Self::NotStarted, Self::InProgress, Self::Finished];

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::NotStarted => &[Self::InProgress],
            Self::InProgress => &[Self::Finished],
            Self::Finished => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    ///
    /// Staying in the same state is always allowed, so repeated
    /// `start`/`complete` calls are idempotent.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self == next || self.allowed_next_states().contains(&next)
    }

    /// Return the string representation used in SQL storage and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "NOT STARTED",
            Self::InProgress => "IN PROGRESS",
            Self::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for ExperimentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperimentStatus {
    type Err = CoreError;

    /// Accepts the wire labels plus the CLI-friendly spellings
    /// `not_started`, `in-progress`, `finished` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['_', '-'], " ");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "invalid experiment status '{s}' (expected one of: NOT STARTED, IN PROGRESS, FINISHED)"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// The three persisted entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Problem,
    Research,
    Experiment,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Problem => "problem",
            Self::Research => "research",
            Self::Experiment => "experiment",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
