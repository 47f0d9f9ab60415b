//! Create payloads accepted by the REST surface.
//!
//! The owning problem of a child record always comes from the URL path, never
//! from the body. Unknown body keys are ignored, so older clients that still
//! send `problemId` keep working.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, require_text};

/// Body of `POST /problems`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CreateProblem {
    pub brief: String,
}

/// Body of `POST /problems/:problem/research`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CreateResearch {
    pub content: String,
}

/// Body of `POST /problems/:problem/experiments`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CreateExperiment {
    pub proposal: String,
}

impl CreateProblem {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `brief` is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("brief", &self.brief).map(drop)
    }
}

impl CreateResearch {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `content` is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("content", &self.content).map(drop)
    }
}

impl CreateExperiment {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `proposal` is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("proposal", &self.proposal).map(drop)
    }
}
