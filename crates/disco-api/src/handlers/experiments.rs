use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use disco_core::EntityId;
use disco_core::entities::Experiment;
use disco_core::enums::EntityType;
use disco_core::payloads::CreateExperiment;
use disco_core::responses::DeleteResponse;
use disco_core::updates::ExperimentUpdate;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    path: Result<Path<EntityId>, PathRejection>,
    payload: Result<Json<CreateExperiment>, JsonRejection>,
) -> Result<(StatusCode, Json<Experiment>), ApiError> {
    let Path(problem_id) = path?;
    let Json(payload) = payload?;
    let item = state
        .service()
        .create_experiment(problem_id, &payload.proposal)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn list(
    State(state): State<AppState>,
    path: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<Vec<Experiment>>, ApiError> {
    let Path(problem_id) = path?;
    Ok(Json(state.service().list_experiments(problem_id).await?))
}

pub async fn list_approved(
    State(state): State<AppState>,
    path: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<Vec<Experiment>>, ApiError> {
    let Path(problem_id) = path?;
    Ok(Json(state.service().list_approved_experiments(problem_id).await?))
}

pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<(EntityId, EntityId)>, PathRejection>,
) -> Result<Json<Experiment>, ApiError> {
    let Path((problem_id, id)) = path?;
    Ok(Json(state.service().get_experiment(problem_id, id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<(EntityId, EntityId)>, PathRejection>,
    payload: Result<Json<ExperimentUpdate>, JsonRejection>,
) -> Result<Json<Experiment>, ApiError> {
    let Path((problem_id, id)) = path?;
    let Json(update) = payload?;
    Ok(Json(
        state.service().update_experiment(problem_id, id, update).await?,
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<(EntityId, EntityId)>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path((problem_id, id)) = path?;
    state.service().delete_experiment(problem_id, id).await?;
    Ok(Json(DeleteResponse::deleted(EntityType::Experiment, id)))
}
