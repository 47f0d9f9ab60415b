use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use disco_core::EntityId;
use disco_core::entities::Research;
use disco_core::enums::EntityType;
use disco_core::payloads::CreateResearch;
use disco_core::responses::DeleteResponse;
use disco_core::updates::ResearchUpdate;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    path: Result<Path<EntityId>, PathRejection>,
    payload: Result<Json<CreateResearch>, JsonRejection>,
) -> Result<(StatusCode, Json<Research>), ApiError> {
    let Path(problem_id) = path?;
    let Json(payload) = payload?;
    let item = state
        .service()
        .create_research(problem_id, &payload.content)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn list(
    State(state): State<AppState>,
    path: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<Vec<Research>>, ApiError> {
    let Path(problem_id) = path?;
    Ok(Json(state.service().list_research(problem_id).await?))
}

pub async fn list_approved(
    State(state): State<AppState>,
    path: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<Vec<Research>>, ApiError> {
    let Path(problem_id) = path?;
    Ok(Json(state.service().list_approved_research(problem_id).await?))
}

pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<(EntityId, EntityId)>, PathRejection>,
) -> Result<Json<Research>, ApiError> {
    let Path((problem_id, id)) = path?;
    Ok(Json(state.service().get_research(problem_id, id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<(EntityId, EntityId)>, PathRejection>,
    payload: Result<Json<ResearchUpdate>, JsonRejection>,
) -> Result<Json<Research>, ApiError> {
    let Path((problem_id, id)) = path?;
    let Json(update) = payload?;
    Ok(Json(
        state.service().update_research(problem_id, id, update).await?,
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<(EntityId, EntityId)>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path((problem_id, id)) = path?;
    state.service().delete_research(problem_id, id).await?;
    Ok(Json(DeleteResponse::deleted(EntityType::Research, id)))
}
