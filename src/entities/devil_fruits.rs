use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const MIN_RARITY: i32 = 1;
pub const MAX_RARITY: i32 = 5;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FruitType {
    #[default]
    #[sea_orm(string_value = "PARAMECIA")]
    Paramecia,
    #[sea_orm(string_value = "ZOAN")]
    Zoan,
    #[sea_orm(string_value = "LOGIA")]
    Logia,
}

impl FruitType {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Paramecia => "Paramecia",
            Self::Zoan => "Zoan",
            Self::Logia => "Logia",
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FruitStatus {
    #[default]
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "LOST")]
    Lost,
    #[sea_orm(string_value = "UNKNOWN")]
    Unknown,
}

impl FruitStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Actif",
            Self::Lost => "Perdu",
            Self::Unknown => "Inconnu",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "devil_fruits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub romanji: String,
    pub fruit_type: FruitType,
    pub ability: String,
    pub weaknesses: String,
    /// 1 (common) to 5 (legendary)
    pub rarity: i32,
    pub status: FruitStatus,
    pub first_appearance_arc_id: Option<i32>,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::arcs::Entity",
        from = "Column::FirstAppearanceArcId",
        to = "super::arcs::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    FirstAppearanceArc,
    #[sea_orm(has_many = "super::fruit_holders::Entity")]
    FruitHolders,
}

impl Related<super::arcs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FirstAppearanceArc.def()
    }
}

impl Related<super::fruit_holders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FruitHolders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
