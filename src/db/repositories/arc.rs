use crate::entities::{arcs, episodes, prelude::*};
use crate::models::catalog::ArcInput;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, Order, QueryOrder, Set,
};
use tracing::info;

use super::{ListParams, ListSpec, Page, fetch_page};

pub struct ArcRepository {
    conn: DatabaseConnection,
}

impl ArcRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn spec() -> ListSpec<'static, Arcs> {
        ListSpec {
            search: &[
                arcs::Column::Name,
                arcs::Column::Saga,
                arcs::Column::Description,
            ],
            ordering: &[
                ("id", arcs::Column::Id),
                ("name", arcs::Column::Name),
                ("start_episode_number", arcs::Column::StartEpisodeNumber),
            ],
            default_ordering: vec![(arcs::Column::StartEpisodeNumber, Order::Asc)],
            tie_breaker: arcs::Column::Id,
        }
    }

    fn active_model(input: &ArcInput) -> arcs::ActiveModel {
        arcs::ActiveModel {
            name: Set(input.name.trim().to_string()),
            saga: Set(input.saga.clone()),
            start_episode_number: Set(input.start_episode_number),
            end_episode_number: Set(input.end_episode_number),
            description: Set(input.description.clone()),
            ..Default::default()
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page<arcs::Model>> {
        let select = Self::spec().apply(Arcs::find(), params);
        fetch_page(&self.conn, select, params).await
    }

    pub async fn all(&self) -> Result<Vec<arcs::Model>> {
        Ok(Arcs::find()
            .order_by_asc(arcs::Column::StartEpisodeNumber)
            .order_by_asc(arcs::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn get(&self, id: i32) -> Result<Option<arcs::Model>> {
        Ok(Arcs::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn episodes(&self, arc: &arcs::Model) -> Result<Vec<episodes::Model>> {
        Ok(arc
            .find_related(Episodes)
            .order_by_asc(episodes::Column::Number)
            .all(&self.conn)
            .await?)
    }

    pub async fn create(&self, input: &ArcInput) -> Result<arcs::Model> {
        let model = Self::active_model(input).insert(&self.conn).await?;
        info!("Created arc {} ({})", model.id, model.name);
        Ok(model)
    }

    pub async fn update(&self, id: i32, input: &ArcInput) -> Result<Option<arcs::Model>> {
        let mut active = Self::active_model(input);
        active.id = Set(id);

        match active.update(&self.conn).await {
            Ok(model) => Ok(Some(model)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Episodes and devil fruits pointing at the arc keep existing with a null reference.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Arcs::delete_by_id(id).exec(&self.conn).await?;
        if result.rows_affected > 0 {
            info!("Deleted arc {}", id);
        }
        Ok(result.rows_affected > 0)
    }
}
