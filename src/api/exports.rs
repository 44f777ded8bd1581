use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{ApiError, AppState, ExportRequest};
use crate::services::ExportFile;

fn attachment(file: ExportFile) -> Response {
    (
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.bytes,
    )
        .into_response()
}

pub async fn character_pdf(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    let file = state
        .admin_service()
        .export_character_pdf(&payload.ids)
        .await?;
    Ok(attachment(file))
}

pub async fn fruit_pdf(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    let file = state.admin_service().export_fruit_pdf(&payload.ids).await?;
    Ok(attachment(file))
}

pub async fn characters_csv(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    let file = state
        .admin_service()
        .export_characters_csv(&payload.ids)
        .await?;
    Ok(attachment(file))
}

pub async fn fruits_csv(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    let file = state.admin_service().export_fruits_csv(&payload.ids).await?;
    Ok(attachment(file))
}
