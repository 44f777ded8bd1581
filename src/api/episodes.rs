use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{ListQuery, validate_id};
use super::{ApiError, ApiResponse, AppState, EpisodeDetailDto, EpisodeListDto, PageDto};
use crate::entities::episodes;
use crate::models::catalog::EpisodeInput;

pub async fn list_episodes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<PageDto<EpisodeListDto>>>, ApiError> {
    let params = state.list_params(query).await?;
    let page = state.catalog_service().list_episodes(&params).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EpisodeDetailDto>>, ApiError> {
    let id = validate_id(id)?;
    let episode = state.catalog_service().get_episode(id).await?;
    Ok(Json(ApiResponse::success(episode)))
}

pub async fn create_episode(
    State(state): State<Arc<AppState>>,
    Json(input): Json<EpisodeInput>,
) -> Result<(StatusCode, Json<ApiResponse<episodes::Model>>), ApiError> {
    let episode = state.admin_service().create_episode(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(episode))))
}

pub async fn update_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<EpisodeInput>,
) -> Result<Json<ApiResponse<episodes::Model>>, ApiError> {
    let id = validate_id(id)?;
    let episode = state.admin_service().update_episode(id, input).await?;
    Ok(Json(ApiResponse::success(episode)))
}

pub async fn delete_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id(id)?;
    state.admin_service().delete_episode(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
