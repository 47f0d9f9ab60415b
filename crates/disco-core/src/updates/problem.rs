//! Problem update builder.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, require_text};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProblemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_investigate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_experiments: Option<Vec<String>>,
}

impl ProblemUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.brief.is_none() && self.is_investigate.is_none() && self.related_experiments.is_none()
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if a supplied `brief` is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(ref brief) = self.brief {
            require_text("brief", brief)?;
        }
        Ok(())
    }
}

pub struct ProblemUpdateBuilder(ProblemUpdate);

impl Default for ProblemUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProblemUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ProblemUpdate::default())
    }

    #[must_use]
    pub fn brief(mut self, brief: impl Into<String>) -> Self {
        self.0.brief = Some(brief.into());
        self
    }

    #[must_use]
    pub const fn is_investigate(mut self, flag: bool) -> Self {
        self.0.is_investigate = Some(flag);
        self
    }

    #[must_use]
    pub fn related_experiments(mut self, related: Vec<String>) -> Self {
        self.0.related_experiments = Some(related);
        self
    }

    #[must_use]
    pub fn build(self) -> ProblemUpdate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_keys_stay_none() {
        let update: ProblemUpdate = serde_json::from_str(r#"{"isInvestigate":true}"#).unwrap();
        assert_eq!(
            update,
            ProblemUpdateBuilder::new().is_investigate(true).build()
        );
    }

    #[test]
    fn serializes_changed_fields_only() {
        let update = ProblemUpdateBuilder::new().brief("New brief").build();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "brief": "New brief" }));
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(ProblemUpdate::default().is_empty());
        assert!(!ProblemUpdateBuilder::new().is_investigate(false).build().is_empty());
    }

    #[test]
    fn blank_brief_is_rejected() {
        let update = ProblemUpdateBuilder::new().brief("  ").build();
        assert!(update.validate().is_err());
    }
}
