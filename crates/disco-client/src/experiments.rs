//! `/problems/:problem_id/experiments` endpoints.

use disco_core::EntityId;
use disco_core::entities::Experiment;
use disco_core::enums::ExperimentStatus;
use disco_core::payloads::CreateExperiment;
use disco_core::responses::DeleteResponse;
use disco_core::updates::{ExperimentUpdate, ExperimentUpdateBuilder};
use reqwest::Method;

use crate::{ApiClient, ClientError};

fn collection(problem_id: EntityId) -> String {
    format!("/problems/{problem_id}/experiments")
}

fn item(problem_id: EntityId, id: EntityId) -> String {
    format!("/problems/{problem_id}/experiments/{id}")
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Upstream`] with status 404 if the problem does
    /// not exist, or 400 for a blank proposal.
    pub async fn add_experiment(
        &self,
        problem_id: EntityId,
        proposal: &str,
    ) -> Result<Experiment, ClientError> {
        let body = CreateExperiment {
            proposal: proposal.to_string(),
        };
        self.send_json(Method::POST, &collection(problem_id), &body)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn list_experiments(
        &self,
        problem_id: EntityId,
    ) -> Result<Vec<Experiment>, ClientError> {
        self.get_json(&collection(problem_id)).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn list_approved_experiments(
        &self,
        problem_id: EntityId,
    ) -> Result<Vec<Experiment>, ClientError> {
        self.get_json(&format!("{}/approved", collection(problem_id)))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Upstream`] with status 404 if the experiment
    /// does not exist under `problem_id`.
    pub async fn get_experiment(
        &self,
        problem_id: EntityId,
        id: EntityId,
    ) -> Result<Experiment, ClientError> {
        self.get_json(&item(problem_id, id)).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Upstream`] with status 404 if the experiment
    /// does not exist, or 409 if the server enforces transitions and the
    /// status change is not allowed.
    pub async fn update_experiment(
        &self,
        problem_id: EntityId,
        id: EntityId,
        update: &ExperimentUpdate,
    ) -> Result<Experiment, ClientError> {
        self.send_json(Method::PATCH, &item(problem_id, id), update)
            .await
    }

    /// Move an experiment to `IN PROGRESS`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::update_experiment`].
    pub async fn start_experiment(
        &self,
        problem_id: EntityId,
        id: EntityId,
    ) -> Result<Experiment, ClientError> {
        let update = ExperimentUpdateBuilder::new()
            .status(ExperimentStatus::InProgress)
            .build();
        self.update_experiment(problem_id, id, &update).await
    }

    /// Move an experiment to `FINISHED`, recording a result link if given.
    /// Without a link, any existing one is left untouched.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::update_experiment`].
    pub async fn complete_experiment(
        &self,
        problem_id: EntityId,
        id: EntityId,
        url: Option<String>,
    ) -> Result<Experiment, ClientError> {
        let mut builder = ExperimentUpdateBuilder::new().status(ExperimentStatus::Finished);
        if url.is_some() {
            builder = builder.url(url);
        }
        self.update_experiment(problem_id, id, &builder.build()).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Upstream`] with status 404 if the experiment
    /// does not exist under `problem_id`.
    pub async fn delete_experiment(
        &self,
        problem_id: EntityId,
        id: EntityId,
    ) -> Result<DeleteResponse, ClientError> {
        self.delete_json(&item(problem_id, id)).await
    }
}
