use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use disco_core::EntityId;
use disco_core::entities::Problem;
use disco_core::enums::EntityType;
use disco_core::payloads::CreateProblem;
use disco_core::responses::DeleteResponse;
use disco_core::updates::ProblemUpdate;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateProblem>, JsonRejection>,
) -> Result<(StatusCode, Json<Problem>), ApiError> {
    let Json(payload) = payload?;
    let problem = state.service().create_problem(&payload.brief).await?;
    Ok((StatusCode::CREATED, Json(problem)))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Problem>>, ApiError> {
    Ok(Json(state.service().list_problems().await?))
}

pub async fn list_investigate(
    State(state): State<AppState>,
) -> Result<Json<Vec<Problem>>, ApiError> {
    Ok(Json(state.service().list_investigate_problems().await?))
}

pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<Problem>, ApiError> {
    let Path(id) = path?;
    Ok(Json(state.service().get_problem(id).await?))
}

/// Shared by `PUT` and `PATCH`: only supplied fields change.
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<EntityId>, PathRejection>,
    payload: Result<Json<ProblemUpdate>, JsonRejection>,
) -> Result<Json<Problem>, ApiError> {
    let Path(id) = path?;
    let Json(update) = payload?;
    Ok(Json(state.service().update_problem(id, update).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = path?;
    state.service().delete_problem(id).await?;
    Ok(Json(DeleteResponse::deleted(EntityType::Problem, id)))
}
