use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{ListQuery, validate_id};
use super::{ApiError, ApiResponse, AppState, FruitDetailDto, FruitListDto, PageDto};
use crate::entities::{devil_fruits, fruit_holders};
use crate::models::catalog::{DevilFruitInput, InlineHolderInput};

pub async fn list_fruits(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<PageDto<FruitListDto>>>, ApiError> {
    let params = state.list_params(query).await?;
    let page = state.catalog_service().list_fruits(&params).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_fruit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<FruitDetailDto>>, ApiError> {
    let id = validate_id(id)?;
    let fruit = state.catalog_service().get_fruit(id).await?;
    Ok(Json(ApiResponse::success(fruit)))
}

pub async fn create_fruit(
    State(state): State<Arc<AppState>>,
    Json(input): Json<DevilFruitInput>,
) -> Result<(StatusCode, Json<ApiResponse<devil_fruits::Model>>), ApiError> {
    let fruit = state.admin_service().create_fruit(input).await?;
    tracing::info!(id = fruit.id, "Created devil fruit {}", fruit.name);
    Ok((StatusCode::CREATED, Json(ApiResponse::success(fruit))))
}

pub async fn update_fruit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<DevilFruitInput>,
) -> Result<Json<ApiResponse<devil_fruits::Model>>, ApiError> {
    let id = validate_id(id)?;
    let fruit = state.admin_service().update_fruit(id, input).await?;
    Ok(Json(ApiResponse::success(fruit)))
}

pub async fn delete_fruit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id(id)?;
    state.admin_service().delete_fruit(id).await?;
    tracing::info!(id, "Deleted devil fruit");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_holder(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<InlineHolderInput>,
) -> Result<(StatusCode, Json<ApiResponse<fruit_holders::Model>>), ApiError> {
    let id = validate_id(id)?;
    let holder = state.admin_service().add_fruit_holder(id, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(holder))))
}
