//! `/problems/:problem_id/research` endpoints.

use disco_core::EntityId;
use disco_core::entities::Research;
use disco_core::payloads::CreateResearch;
use disco_core::responses::DeleteResponse;
use disco_core::updates::{ResearchUpdate, ResearchUpdateBuilder};
use reqwest::Method;

use crate::{ApiClient, ClientError};

fn collection(problem_id: EntityId) -> String {
    format!("/problems/{problem_id}/research")
}

fn item(problem_id: EntityId, id: EntityId) -> String {
    format!("/problems/{problem_id}/research/{id}")
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Upstream`] with status 404 if the problem does
    /// not exist, or 400 for blank content.
    pub async fn add_research(
        &self,
        problem_id: EntityId,
        content: &str,
    ) -> Result<Research, ClientError> {
        let body = CreateResearch {
            content: content.to_string(),
        };
        self.send_json(Method::POST, &collection(problem_id), &body)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn list_research(&self, problem_id: EntityId) -> Result<Vec<Research>, ClientError> {
        self.get_json(&collection(problem_id)).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn list_approved_research(
        &self,
        problem_id: EntityId,
    ) -> Result<Vec<Research>, ClientError> {
        self.get_json(&format!("{}/approved", collection(problem_id)))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Upstream`] with status 404 if the item does not
    /// exist under `problem_id`.
    pub async fn get_research(
        &self,
        problem_id: EntityId,
        id: EntityId,
    ) -> Result<Research, ClientError> {
        self.get_json(&item(problem_id, id)).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Upstream`] with status 404 if the item does not
    /// exist under `problem_id`.
    pub async fn update_research(
        &self,
        problem_id: EntityId,
        id: EntityId,
        update: &ResearchUpdate,
    ) -> Result<Research, ClientError> {
        self.send_json(Method::PATCH, &item(problem_id, id), update)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Upstream`] with status 404 if the item does not
    /// exist under `problem_id`.
    pub async fn set_research_approval(
        &self,
        problem_id: EntityId,
        id: EntityId,
        approved: bool,
    ) -> Result<Research, ClientError> {
        let update = ResearchUpdateBuilder::new().is_approved(approved).build();
        self.update_research(problem_id, id, &update).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Upstream`] with status 404 if the item does not
    /// exist under `problem_id`.
    pub async fn delete_research(
        &self,
        problem_id: EntityId,
        id: EntityId,
    ) -> Result<DeleteResponse, ClientError> {
        self.delete_json(&item(problem_id, id)).await
    }
}
