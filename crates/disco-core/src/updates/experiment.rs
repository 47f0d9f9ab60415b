//! Experiment update builder.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ExperimentStatus;
use crate::errors::{CoreError, require_text};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ExperimentStatus>,
    /// `Some(None)` clears the link; `None` leaves it untouched.
    #[serde(
        default,
        deserialize_with = "super::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<String>")]
    pub url: Option<Option<String>>,
}

impl ExperimentUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.proposal.is_none()
            && self.is_approved.is_none()
            && self.status.is_none()
            && self.url.is_none()
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if a supplied `proposal` or `url` is
    /// blank. Clearing the link is spelled `url: null`, not `""`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(ref proposal) = self.proposal {
            require_text("proposal", proposal)?;
        }
        if let Some(Some(ref url)) = self.url {
            require_text("url", url)?;
        }
        Ok(())
    }
}

pub struct ExperimentUpdateBuilder(ExperimentUpdate);

impl Default for ExperimentUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperimentUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ExperimentUpdate::default())
    }

    #[must_use]
    pub fn proposal(mut self, proposal: impl Into<String>) -> Self {
        self.0.proposal = Some(proposal.into());
        self
    }

    #[must_use]
    pub const fn is_approved(mut self, approved: bool) -> Self {
        self.0.is_approved = Some(approved);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: ExperimentStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn url(mut self, url: Option<String>) -> Self {
        self.0.url = Some(url);
        self
    }

    #[must_use]
    pub fn build(self) -> ExperimentUpdate {
        self.0
    }
}
