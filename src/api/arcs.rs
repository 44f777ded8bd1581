use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{ListQuery, validate_id};
use super::{ApiError, ApiResponse, AppState, ArcDetailDto, ArcListDto, PageDto};
use crate::entities::{arcs, episodes};
use crate::models::catalog::{ArcInput, EpisodeInput};

pub async fn list_arcs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<PageDto<ArcListDto>>>, ApiError> {
    let params = state.list_params(query).await?;
    let page = state.catalog_service().list_arcs(&params).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_arc(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ArcDetailDto>>, ApiError> {
    let id = validate_id(id)?;
    let arc = state.catalog_service().get_arc(id).await?;
    Ok(Json(ApiResponse::success(arc)))
}

pub async fn create_arc(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ArcInput>,
) -> Result<(StatusCode, Json<ApiResponse<arcs::Model>>), ApiError> {
    let arc = state.admin_service().create_arc(input).await?;
    tracing::info!(id = arc.id, "Created arc {}", arc.name);
    Ok((StatusCode::CREATED, Json(ApiResponse::success(arc))))
}

pub async fn update_arc(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<ArcInput>,
) -> Result<Json<ApiResponse<arcs::Model>>, ApiError> {
    let id = validate_id(id)?;
    let arc = state.admin_service().update_arc(id, input).await?;
    Ok(Json(ApiResponse::success(arc)))
}

pub async fn delete_arc(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id(id)?;
    state.admin_service().delete_arc(id).await?;
    tracing::info!(id, "Deleted arc");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<EpisodeInput>,
) -> Result<(StatusCode, Json<ApiResponse<episodes::Model>>), ApiError> {
    let id = validate_id(id)?;
    let episode = state.admin_service().add_arc_episode(id, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(episode))))
}
