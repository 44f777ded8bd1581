use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, DashboardStats};

/// GET /admin/stats
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let stats = state.admin_service().dashboard().await?;
    Ok(Json(ApiResponse::success(stats)))
}
