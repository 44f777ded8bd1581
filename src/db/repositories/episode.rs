use crate::entities::{arcs, episodes, prelude::*};
use crate::models::catalog::EpisodeInput;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;

use super::{ListParams, ListSpec, Page, fetch_page};

pub struct EpisodeRepository {
    conn: DatabaseConnection,
}

impl EpisodeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn spec() -> ListSpec<'static, Episodes> {
        ListSpec {
            search: &[episodes::Column::Title],
            ordering: &[
                ("number", episodes::Column::Number),
                ("title", episodes::Column::Title),
            ],
            default_ordering: vec![(episodes::Column::Number, Order::Asc)],
            tie_breaker: episodes::Column::Id,
        }
    }

    fn active_model(input: &EpisodeInput) -> episodes::ActiveModel {
        episodes::ActiveModel {
            number: Set(input.number),
            title: Set(input.title.trim().to_string()),
            air_date: Set(input.air_date),
            arc_id: Set(input.arc_id),
            ..Default::default()
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page<episodes::Model>> {
        let select = Self::spec().apply(Episodes::find(), params);
        fetch_page(&self.conn, select, params).await
    }

    pub async fn all(&self) -> Result<Vec<episodes::Model>> {
        Ok(Episodes::find()
            .order_by_asc(episodes::Column::Number)
            .all(&self.conn)
            .await?)
    }

    pub async fn get(&self, id: i32) -> Result<Option<episodes::Model>> {
        Ok(Episodes::find_by_id(id).one(&self.conn).await?)
    }

    /// Episode together with the arc it belongs to, if any.
    pub async fn get_with_arc(&self, id: i32) -> Result<Option<(episodes::Model, Option<arcs::Model>)>> {
        Ok(Episodes::find_by_id(id)
            .find_also_related(Arcs)
            .one(&self.conn)
            .await?)
    }

    pub async fn get_many_with_arc(
        &self,
        ids: &[i32],
    ) -> Result<HashMap<i32, (episodes::Model, Option<arcs::Model>)>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Episodes::find()
            .filter(episodes::Column::Id.is_in(ids.to_vec()))
            .find_also_related(Arcs)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(episode, arc)| (episode.id, (episode, arc)))
            .collect())
    }

    pub async fn create(&self, input: &EpisodeInput) -> Result<episodes::Model> {
        Ok(Self::active_model(input).insert(&self.conn).await?)
    }

    pub async fn update(&self, id: i32, input: &EpisodeInput) -> Result<Option<episodes::Model>> {
        let mut active = Self::active_model(input);
        active.id = Set(id);

        match active.update(&self.conn).await {
            Ok(model) => Ok(Some(model)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Episodes::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
