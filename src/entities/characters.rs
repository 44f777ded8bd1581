use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "PIRATE")]
    Pirate,
    #[sea_orm(string_value = "MARINE")]
    Marine,
    #[sea_orm(string_value = "REVOLUTIONARY")]
    Revolutionary,
    #[sea_orm(string_value = "CIVILIAN")]
    Civilian,
    #[default]
    #[sea_orm(string_value = "OTHER")]
    Other,
}

impl Role {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pirate => "Pirate",
            Self::Marine => "Marine",
            Self::Revolutionary => "Révolutionnaire",
            Self::Civilian => "Civil",
            Self::Other => "Autre",
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CharacterStatus {
    #[default]
    #[sea_orm(string_value = "ALIVE")]
    Alive,
    #[sea_orm(string_value = "DEAD")]
    Dead,
    #[sea_orm(string_value = "UNKNOWN")]
    Unknown,
}

impl CharacterStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Alive => "Vivant",
            Self::Dead => "Mort",
            Self::Unknown => "Inconnu",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "characters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub epithet: String,
    pub role: Role,
    pub bounty: i64,
    pub origin: String,
    pub status: CharacterStatus,
    pub first_appearance_episode_id: Option<i32>,
    pub description: String,
    pub image_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::episodes::Entity",
        from = "Column::FirstAppearanceEpisodeId",
        to = "super::episodes::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    FirstAppearanceEpisode,
    #[sea_orm(has_many = "super::fruit_holders::Entity")]
    FruitHolders,
    #[sea_orm(has_many = "super::crew_members::Entity")]
    CrewMembers,
}

impl Related<super::episodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FirstAppearanceEpisode.def()
    }
}

impl Related<super::fruit_holders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FruitHolders.def()
    }
}

impl Related<super::crew_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CrewMembers.def()
    }
}

impl Related<super::crews::Entity> for Entity {
    fn to() -> RelationDef {
        super::crew_members::Relation::Crew.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::crew_members::Relation::Character.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
