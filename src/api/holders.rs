use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState};
use crate::entities::fruit_holders;
use crate::models::catalog::HolderInput;

/// POST /admin/holders
/// A current holder demotes the fruit's previous current holder
pub async fn create_holder(
    State(state): State<Arc<AppState>>,
    Json(input): Json<HolderInput>,
) -> Result<(StatusCode, Json<ApiResponse<fruit_holders::Model>>), ApiError> {
    let holder = state.admin_service().create_holder(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(holder))))
}

pub async fn update_holder(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<HolderInput>,
) -> Result<Json<ApiResponse<fruit_holders::Model>>, ApiError> {
    let id = validate_id(id)?;
    let holder = state.admin_service().update_holder(id, input).await?;
    Ok(Json(ApiResponse::success(holder)))
}

pub async fn delete_holder(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id(id)?;
    state.admin_service().delete_holder(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
