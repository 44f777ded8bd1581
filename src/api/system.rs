use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, HealthResponse};

/// GET /health
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    tracing::debug!(uptime_secs = state.start_time.elapsed().as_secs(), "Health check");

    Ok(Json(ApiResponse::success(HealthResponse { status: "ok" })))
}
