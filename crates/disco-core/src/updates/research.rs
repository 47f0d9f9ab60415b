//! Research update builder.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, require_text};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResearchUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,
}

impl ResearchUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_none() && self.is_approved.is_none()
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if a supplied `content` is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(ref content) = self.content {
            require_text("content", content)?;
        }
        Ok(())
    }
}

pub struct ResearchUpdateBuilder(ResearchUpdate);

impl Default for ResearchUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResearchUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ResearchUpdate::default())
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.0.content = Some(content.into());
        self
    }

    #[must_use]
    pub const fn is_approved(mut self, approved: bool) -> Self {
        self.0.is_approved = Some(approved);
        self
    }

    #[must_use]
    pub fn build(self) -> ResearchUpdate {
        self.0
    }
}
