//! Domain service for catalog administration.
//!
//! Validated create/update/delete for every catalog entity, crew membership
//! replacement, inline child creation, record exports and dashboard data.
//! Every holder write goes through the current-holder rule of
//! [`crate::db::repositories::fruit_holder::FruitHolderRepository::save`].

use crate::api::types::DashboardStats;
use crate::entities::{arcs, characters, crews, devil_fruits, episodes, fruit_holders};
use crate::models::catalog::{
    ArcInput, CharacterInput, CrewInput, DevilFruitInput, EpisodeInput, FieldError, HolderInput,
    InlineHolderInput,
};
use crate::services::export::ExportFile;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("{0}")]
    NotFound(String),

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The export was asked for a selection it cannot render.
    #[error("{0}")]
    ExportPrecondition(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AdminError {
    pub fn not_found(resource: &str, id: i32) -> Self {
        Self::NotFound(format!("{resource} {id} not found"))
    }

    pub fn missing_reference(field: &str, id: i32) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: format!("Invalid pk \"{id}\" - object does not exist."),
        }
    }
}

impl From<FieldError> for AdminError {
    fn from(err: FieldError) -> Self {
        Self::Validation {
            field: err.field.to_string(),
            message: err.message,
        }
    }
}

impl From<DbErr> for AdminError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::Validation {
                field: "reference".to_string(),
                message: msg,
            },
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for AdminError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DbErr>() {
            Ok(db_err) => Self::from(db_err),
            Err(err) => Self::Database(err.to_string()),
        }
    }
}

/// Domain service trait for catalog administration.
#[async_trait::async_trait]
pub trait AdminService: Send + Sync {
    async fn create_arc(&self, input: ArcInput) -> Result<arcs::Model, AdminError>;

    async fn update_arc(&self, id: i32, input: ArcInput) -> Result<arcs::Model, AdminError>;

    /// Episodes and fruits of the arc are detached, not deleted.
    async fn delete_arc(&self, id: i32) -> Result<(), AdminError>;

    async fn create_episode(&self, input: EpisodeInput) -> Result<episodes::Model, AdminError>;

    async fn update_episode(
        &self,
        id: i32,
        input: EpisodeInput,
    ) -> Result<episodes::Model, AdminError>;

    async fn delete_episode(&self, id: i32) -> Result<(), AdminError>;

    /// Creates an episode inside `arc_id`, ignoring any arc in `input`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if the arc does not exist.
    async fn add_arc_episode(
        &self,
        arc_id: i32,
        input: EpisodeInput,
    ) -> Result<episodes::Model, AdminError>;

    async fn create_crew(&self, input: CrewInput) -> Result<crews::Model, AdminError>;

    async fn update_crew(&self, id: i32, input: CrewInput) -> Result<crews::Model, AdminError>;

    async fn delete_crew(&self, id: i32) -> Result<(), AdminError>;

    /// Replaces the member set of a crew.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] naming `character_ids` if any id is unknown.
    async fn set_crew_members(&self, crew_id: i32, character_ids: &[i32])
    -> Result<(), AdminError>;

    async fn create_character(
        &self,
        input: CharacterInput,
    ) -> Result<characters::Model, AdminError>;

    async fn update_character(
        &self,
        id: i32,
        input: CharacterInput,
    ) -> Result<characters::Model, AdminError>;

    /// Removes the character's holder history and memberships with it.
    async fn delete_character(&self, id: i32) -> Result<(), AdminError>;

    async fn create_fruit(&self, input: DevilFruitInput)
    -> Result<devil_fruits::Model, AdminError>;

    async fn update_fruit(
        &self,
        id: i32,
        input: DevilFruitInput,
    ) -> Result<devil_fruits::Model, AdminError>;

    /// Removes the fruit's holder history with it.
    async fn delete_fruit(&self, id: i32) -> Result<(), AdminError>;

    /// Creates a holder row. A current row demotes the fruit's other current holder.
    async fn create_holder(&self, input: HolderInput)
    -> Result<fruit_holders::Model, AdminError>;

    async fn update_holder(
        &self,
        id: i32,
        input: HolderInput,
    ) -> Result<fruit_holders::Model, AdminError>;

    async fn delete_holder(&self, id: i32) -> Result<(), AdminError>;

    async fn add_fruit_holder(
        &self,
        devil_fruit_id: i32,
        input: InlineHolderInput,
    ) -> Result<fruit_holders::Model, AdminError>;

    async fn add_character_holder(
        &self,
        character_id: i32,
        input: InlineHolderInput,
    ) -> Result<fruit_holders::Model, AdminError>;

    /// PDF sheet of exactly one character.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ExportPrecondition`] unless `ids` names exactly one record.
    async fn export_character_pdf(&self, ids: &[i32]) -> Result<ExportFile, AdminError>;

    /// PDF sheet of exactly one devil fruit.
    async fn export_fruit_pdf(&self, ids: &[i32]) -> Result<ExportFile, AdminError>;

    /// CSV of the selected characters; unknown ids are skipped.
    async fn export_characters_csv(&self, ids: &[i32]) -> Result<ExportFile, AdminError>;

    async fn export_fruits_csv(&self, ids: &[i32]) -> Result<ExportFile, AdminError>;

    async fn dashboard(&self) -> Result<DashboardStats, AdminError>;
}
