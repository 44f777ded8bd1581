use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "crews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub ship_name: String,
    pub base_location: String,
    pub description: String,
    pub captain_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::characters::Entity",
        from = "Column::CaptainId",
        to = "super::characters::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Captain,
    #[sea_orm(has_many = "super::crew_members::Entity")]
    CrewMembers,
}

impl Related<super::crew_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CrewMembers.def()
    }
}

/// Crew members, through `crew_members`. The captain is a separate pointer.
impl Related<super::characters::Entity> for Entity {
    fn to() -> RelationDef {
        super::crew_members::Relation::Character.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::crew_members::Relation::Crew.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
