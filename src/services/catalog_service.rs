//! Read-only query surface over the catalog.
//!
//! Every collection offers a paged, searchable `list` and a `get` returning
//! the detail shape with its related records resolved.

use crate::api::types::{
    ArcDetailDto, ArcListDto, CharacterDetailDto, CharacterListDto, CrewDetailDto, CrewListDto,
    EpisodeDetailDto, EpisodeListDto, FruitDetailDto, FruitListDto, PageDto,
};
use crate::db::ListParams;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl CatalogError {
    pub fn not_found(resource: &str, id: i32) -> Self {
        Self::NotFound(format!("{resource} {id} not found"))
    }
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for catalog reads.
///
/// A `page` past the last one yields [`CatalogError::NotFound`], except for
/// page 1 of an empty collection.
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_characters(
        &self,
        params: &ListParams,
    ) -> Result<PageDto<CharacterListDto>, CatalogError>;

    async fn get_character(&self, id: i32) -> Result<CharacterDetailDto, CatalogError>;

    async fn list_crews(&self, params: &ListParams) -> Result<PageDto<CrewListDto>, CatalogError>;

    async fn get_crew(&self, id: i32) -> Result<CrewDetailDto, CatalogError>;

    async fn list_fruits(&self, params: &ListParams)
    -> Result<PageDto<FruitListDto>, CatalogError>;

    async fn get_fruit(&self, id: i32) -> Result<FruitDetailDto, CatalogError>;

    async fn list_arcs(&self, params: &ListParams) -> Result<PageDto<ArcListDto>, CatalogError>;

    async fn get_arc(&self, id: i32) -> Result<ArcDetailDto, CatalogError>;

    async fn list_episodes(
        &self,
        params: &ListParams,
    ) -> Result<PageDto<EpisodeListDto>, CatalogError>;

    async fn get_episode(&self, id: i32) -> Result<EpisodeDetailDto, CatalogError>;
}
