use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{ListQuery, validate_id};
use super::{ApiError, ApiResponse, AppState, CharacterDetailDto, CharacterListDto, PageDto};
use crate::entities::{characters, fruit_holders};
use crate::models::catalog::{CharacterInput, InlineHolderInput};

pub async fn list_characters(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<PageDto<CharacterListDto>>>, ApiError> {
    let params = state.list_params(query).await?;
    let page = state.catalog_service().list_characters(&params).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CharacterDetailDto>>, ApiError> {
    let id = validate_id(id)?;
    let character = state.catalog_service().get_character(id).await?;
    Ok(Json(ApiResponse::success(character)))
}

pub async fn create_character(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CharacterInput>,
) -> Result<(StatusCode, Json<ApiResponse<characters::Model>>), ApiError> {
    let character = state.admin_service().create_character(input).await?;
    tracing::info!(id = character.id, "Created character {}", character.name);
    Ok((StatusCode::CREATED, Json(ApiResponse::success(character))))
}

pub async fn update_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<CharacterInput>,
) -> Result<Json<ApiResponse<characters::Model>>, ApiError> {
    let id = validate_id(id)?;
    let character = state.admin_service().update_character(id, input).await?;
    Ok(Json(ApiResponse::success(character)))
}

pub async fn delete_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id(id)?;
    state.admin_service().delete_character(id).await?;
    tracing::info!(id, "Deleted character");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_holder(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<InlineHolderInput>,
) -> Result<(StatusCode, Json<ApiResponse<fruit_holders::Model>>), ApiError> {
    let id = validate_id(id)?;
    let holder = state.admin_service().add_character_holder(id, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(holder))))
}
