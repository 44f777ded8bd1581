use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "episodes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub number: i32,
    pub title: String,
    pub air_date: Option<Date>,
    pub arc_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::arcs::Entity",
        from = "Column::ArcId",
        to = "super::arcs::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Arc,
}

impl Related<super::arcs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Arc.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
