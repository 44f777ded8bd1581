use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Ownership history of a devil fruit. At most one row per fruit is current.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "fruit_holders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub devil_fruit_id: i32,
    pub character_id: i32,
    pub from_date: Option<Date>,
    pub to_date: Option<Date>,
    pub is_current: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::devil_fruits::Entity",
        from = "Column::DevilFruitId",
        to = "super::devil_fruits::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    DevilFruit,
    #[sea_orm(
        belongs_to = "super::characters::Entity",
        from = "Column::CharacterId",
        to = "super::characters::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Character,
}

impl Related<super::devil_fruits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DevilFruit.def()
    }
}

impl Related<super::characters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Character.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
