use crate::entities::{characters, crew_members, crews, prelude::*};
use crate::models::catalog::CharacterInput;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;
use tracing::info;

use super::{ListParams, ListSpec, Page, fetch_page};

pub struct CharacterRepository {
    conn: DatabaseConnection,
}

impl CharacterRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn spec() -> ListSpec<'static, Characters> {
        ListSpec {
            search: &[
                characters::Column::Name,
                characters::Column::Epithet,
                characters::Column::Role,
                characters::Column::Description,
            ],
            ordering: &[
                ("id", characters::Column::Id),
                ("name", characters::Column::Name),
                ("bounty", characters::Column::Bounty),
            ],
            default_ordering: vec![(characters::Column::Name, Order::Asc)],
            tie_breaker: characters::Column::Id,
        }
    }

    fn active_model(input: &CharacterInput) -> characters::ActiveModel {
        characters::ActiveModel {
            name: Set(input.name.trim().to_string()),
            epithet: Set(input.epithet.clone()),
            role: Set(input.role),
            bounty: Set(input.bounty),
            origin: Set(input.origin.clone()),
            status: Set(input.status),
            first_appearance_episode_id: Set(input.first_appearance_episode_id),
            description: Set(input.description.clone()),
            image_url: Set(input.image_url.clone()),
            ..Default::default()
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page<characters::Model>> {
        let select = Self::spec().apply(Characters::find(), params);
        fetch_page(&self.conn, select, params).await
    }

    pub async fn all(&self) -> Result<Vec<characters::Model>> {
        Ok(Characters::find()
            .order_by_asc(characters::Column::Name)
            .all(&self.conn)
            .await?)
    }

    pub async fn get(&self, id: i32) -> Result<Option<characters::Model>> {
        Ok(Characters::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_many(&self, ids: &[i32]) -> Result<HashMap<i32, characters::Model>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Characters::find()
            .filter(characters::Column::Id.is_in(ids.to_vec()))
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(|c| (c.id, c)).collect())
    }

    /// Crews of each requested character, ordered by crew name.
    pub async fn crews_for(&self, character_ids: &[i32]) -> Result<HashMap<i32, Vec<crews::Model>>> {
        if character_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = CrewMembers::find()
            .filter(crew_members::Column::CharacterId.is_in(character_ids.to_vec()))
            .find_also_related(Crews)
            .all(&self.conn)
            .await?;

        let mut by_character: HashMap<i32, Vec<crews::Model>> = HashMap::new();
        for (link, crew) in rows {
            if let Some(crew) = crew {
                by_character.entry(link.character_id).or_default().push(crew);
            }
        }
        for list in by_character.values_mut() {
            list.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        }

        Ok(by_character)
    }

    pub async fn create(&self, input: &CharacterInput) -> Result<characters::Model> {
        let model = Self::active_model(input).insert(&self.conn).await?;
        info!("Created character {} ({})", model.id, model.name);
        Ok(model)
    }

    pub async fn update(&self, id: i32, input: &CharacterInput) -> Result<Option<characters::Model>> {
        let mut active = Self::active_model(input);
        active.id = Set(id);

        match active.update(&self.conn).await {
            Ok(model) => Ok(Some(model)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deleting a character removes its holder history and memberships;
    /// crews it captained lose their captain.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Characters::delete_by_id(id).exec(&self.conn).await?;
        if result.rows_affected > 0 {
            info!("Deleted character {}", id);
        }
        Ok(result.rows_affected > 0)
    }
}
