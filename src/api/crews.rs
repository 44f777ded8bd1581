use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{ListQuery, validate_id};
use super::{
    ApiError, ApiResponse, AppState, CrewDetailDto, CrewListDto, CrewMembersRequest, PageDto,
};
use crate::entities::crews;
use crate::models::catalog::CrewInput;

pub async fn list_crews(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<PageDto<CrewListDto>>>, ApiError> {
    let params = state.list_params(query).await?;
    let page = state.catalog_service().list_crews(&params).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_crew(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CrewDetailDto>>, ApiError> {
    let id = validate_id(id)?;
    let crew = state.catalog_service().get_crew(id).await?;
    Ok(Json(ApiResponse::success(crew)))
}

pub async fn create_crew(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CrewInput>,
) -> Result<(StatusCode, Json<ApiResponse<crews::Model>>), ApiError> {
    let crew = state.admin_service().create_crew(input).await?;
    tracing::info!(id = crew.id, "Created crew {}", crew.name);
    Ok((StatusCode::CREATED, Json(ApiResponse::success(crew))))
}

pub async fn update_crew(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<CrewInput>,
) -> Result<Json<ApiResponse<crews::Model>>, ApiError> {
    let id = validate_id(id)?;
    let crew = state.admin_service().update_crew(id, input).await?;
    Ok(Json(ApiResponse::success(crew)))
}

pub async fn delete_crew(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id(id)?;
    state.admin_service().delete_crew(id).await?;
    tracing::info!(id, "Deleted crew");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /admin/crews/{id}/members
/// Replaces the member set and returns the updated detail view
pub async fn set_members(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<CrewMembersRequest>,
) -> Result<Json<ApiResponse<CrewDetailDto>>, ApiError> {
    let id = validate_id(id)?;
    state
        .admin_service()
        .set_crew_members(id, &payload.character_ids)
        .await?;
    let crew = state.catalog_service().get_crew(id).await?;
    Ok(Json(ApiResponse::success(crew)))
}
