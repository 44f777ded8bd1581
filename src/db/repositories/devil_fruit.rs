use crate::entities::{arcs, devil_fruits, prelude::*};
use crate::models::catalog::DevilFruitInput;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use super::{ListParams, ListSpec, Page, fetch_page};

pub struct DevilFruitRepository {
    conn: DatabaseConnection,
}

impl DevilFruitRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn spec() -> ListSpec<'static, DevilFruits> {
        ListSpec {
            search: &[
                devil_fruits::Column::Name,
                devil_fruits::Column::Romanji,
                devil_fruits::Column::Ability,
                devil_fruits::Column::Description,
            ],
            ordering: &[
                ("id", devil_fruits::Column::Id),
                ("name", devil_fruits::Column::Name),
                ("rarity", devil_fruits::Column::Rarity),
                ("fruit_type", devil_fruits::Column::FruitType),
            ],
            default_ordering: vec![(devil_fruits::Column::Name, Order::Asc)],
            tie_breaker: devil_fruits::Column::Id,
        }
    }

    fn active_model(input: &DevilFruitInput) -> devil_fruits::ActiveModel {
        devil_fruits::ActiveModel {
            name: Set(input.name.trim().to_string()),
            romanji: Set(input.romanji.clone()),
            fruit_type: Set(input.fruit_type),
            ability: Set(input.ability.clone()),
            weaknesses: Set(input.weaknesses.clone()),
            rarity: Set(input.rarity),
            status: Set(input.status),
            first_appearance_arc_id: Set(input.first_appearance_arc_id),
            description: Set(input.description.clone()),
            ..Default::default()
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page<devil_fruits::Model>> {
        let select = Self::spec().apply(DevilFruits::find(), params);
        fetch_page(&self.conn, select, params).await
    }

    pub async fn all(&self) -> Result<Vec<devil_fruits::Model>> {
        Ok(DevilFruits::find()
            .order_by_asc(devil_fruits::Column::Name)
            .all(&self.conn)
            .await?)
    }

    pub async fn get(&self, id: i32) -> Result<Option<devil_fruits::Model>> {
        Ok(DevilFruits::find_by_id(id).one(&self.conn).await?)
    }

    /// Fruit together with the arc of its first appearance, if any.
    pub async fn get_with_arc(
        &self,
        id: i32,
    ) -> Result<Option<(devil_fruits::Model, Option<arcs::Model>)>> {
        Ok(DevilFruits::find_by_id(id)
            .find_also_related(Arcs)
            .one(&self.conn)
            .await?)
    }

    /// Requested fruits with their first-appearance arc, ordered by name.
    pub async fn get_many_with_arc(
        &self,
        ids: &[i32],
    ) -> Result<Vec<(devil_fruits::Model, Option<arcs::Model>)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(DevilFruits::find()
            .filter(devil_fruits::Column::Id.is_in(ids.to_vec()))
            .find_also_related(Arcs)
            .order_by_asc(devil_fruits::Column::Name)
            .all(&self.conn)
            .await?)
    }

    pub async fn create(&self, input: &DevilFruitInput) -> Result<devil_fruits::Model> {
        let model = Self::active_model(input).insert(&self.conn).await?;
        info!("Created devil fruit {} ({})", model.id, model.name);
        Ok(model)
    }

    pub async fn update(
        &self,
        id: i32,
        input: &DevilFruitInput,
    ) -> Result<Option<devil_fruits::Model>> {
        let mut active = Self::active_model(input);
        active.id = Set(id);

        match active.update(&self.conn).await {
            Ok(model) => Ok(Some(model)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deleting a fruit removes its whole holder history.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = DevilFruits::delete_by_id(id).exec(&self.conn).await?;
        if result.rows_affected > 0 {
            info!("Deleted devil fruit {}", id);
        }
        Ok(result.rows_affected > 0)
    }
}
