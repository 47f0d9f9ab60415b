//! `/problems` endpoints.

use disco_core::EntityId;
use disco_core::entities::Problem;
use disco_core::payloads::CreateProblem;
use disco_core::responses::DeleteResponse;
use disco_core::updates::ProblemUpdate;
use reqwest::Method;

use crate::{ApiClient, ClientError};

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Upstream`] with status 400 for a blank brief.
    pub async fn create_problem(&self, brief: &str) -> Result<Problem, ClientError> {
        let body = CreateProblem {
            brief: brief.to_string(),
        };
        self.send_json(Method::POST, "/problems", &body).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn list_problems(&self) -> Result<Vec<Problem>, ClientError> {
        self.get_json("/problems").await
    }

    /// Problems flagged for active research.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn list_investigate_problems(&self) -> Result<Vec<Problem>, ClientError> {
        self.get_json("/problems/investigate").await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Upstream`] with status 404 if the problem does
    /// not exist.
    pub async fn get_problem(&self, id: EntityId) -> Result<Problem, ClientError> {
        self.get_json(&format!("/problems/{id}")).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Upstream`] with status 404 if the problem does
    /// not exist.
    pub async fn update_problem(
        &self,
        id: EntityId,
        update: &ProblemUpdate,
    ) -> Result<Problem, ClientError> {
        self.send_json(Method::PATCH, &format!("/problems/{id}"), update)
            .await
    }

    /// Delete a problem together with its research and experiments.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Upstream`] with status 404 if the problem does
    /// not exist.
    pub async fn delete_problem(&self, id: EntityId) -> Result<DeleteResponse, ClientError> {
        self.delete_json(&format!("/problems/{id}")).await
    }
}
