use crate::entities::{characters, crew_members, crews, prelude::*};
use crate::models::catalog::CrewInput;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};
use tracing::info;

use super::{ListParams, ListSpec, Page, fetch_page};

pub struct CrewRepository {
    conn: DatabaseConnection,
}

impl CrewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn spec() -> ListSpec<'static, Crews> {
        ListSpec {
            search: &[
                crews::Column::Name,
                crews::Column::ShipName,
                crews::Column::BaseLocation,
            ],
            ordering: &[("id", crews::Column::Id), ("name", crews::Column::Name)],
            default_ordering: vec![(crews::Column::Name, Order::Asc)],
            tie_breaker: crews::Column::Id,
        }
    }

    fn active_model(input: &CrewInput) -> crews::ActiveModel {
        crews::ActiveModel {
            name: Set(input.name.trim().to_string()),
            ship_name: Set(input.ship_name.clone()),
            base_location: Set(input.base_location.clone()),
            description: Set(input.description.clone()),
            captain_id: Set(input.captain_id),
            ..Default::default()
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page<crews::Model>> {
        let select = Self::spec().apply(Crews::find(), params);
        fetch_page(&self.conn, select, params).await
    }

    pub async fn all(&self) -> Result<Vec<crews::Model>> {
        Ok(Crews::find()
            .order_by_asc(crews::Column::Name)
            .all(&self.conn)
            .await?)
    }

    pub async fn get(&self, id: i32) -> Result<Option<crews::Model>> {
        Ok(Crews::find_by_id(id).one(&self.conn).await?)
    }

    /// Members of each requested crew, ordered by name.
    pub async fn members_for(&self, crew_ids: &[i32]) -> Result<HashMap<i32, Vec<characters::Model>>> {
        if crew_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = CrewMembers::find()
            .filter(crew_members::Column::CrewId.is_in(crew_ids.to_vec()))
            .find_also_related(Characters)
            .all(&self.conn)
            .await?;

        let mut members: HashMap<i32, Vec<characters::Model>> = HashMap::new();
        for (link, character) in rows {
            if let Some(character) = character {
                members.entry(link.crew_id).or_default().push(character);
            }
        }
        for list in members.values_mut() {
            list.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        }

        Ok(members)
    }

    pub async fn all_memberships(&self) -> Result<Vec<crew_members::Model>> {
        Ok(CrewMembers::find()
            .order_by_asc(crew_members::Column::CrewId)
            .order_by_asc(crew_members::Column::CharacterId)
            .all(&self.conn)
            .await?)
    }

    pub async fn create(&self, input: &CrewInput) -> Result<crews::Model> {
        let model = Self::active_model(input).insert(&self.conn).await?;
        info!("Created crew {} ({})", model.id, model.name);
        Ok(model)
    }

    pub async fn update(&self, id: i32, input: &CrewInput) -> Result<Option<crews::Model>> {
        let mut active = Self::active_model(input);
        active.id = Set(id);

        match active.update(&self.conn).await {
            Ok(model) => Ok(Some(model)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the member set of a crew. Duplicate ids are collapsed.
    pub async fn set_members(&self, crew_id: i32, character_ids: &[i32]) -> Result<()> {
        let unique: BTreeSet<i32> = character_ids.iter().copied().collect();
        let txn = self.conn.begin().await?;

        CrewMembers::delete_many()
            .filter(crew_members::Column::CrewId.eq(crew_id))
            .exec(&txn)
            .await?;

        if !unique.is_empty() {
            let links = unique.iter().map(|character_id| crew_members::ActiveModel {
                crew_id: Set(crew_id),
                character_id: Set(*character_id),
            });
            CrewMembers::insert_many(links).exec(&txn).await?;
        }

        txn.commit().await?;
        info!("Crew {} now has {} members", crew_id, unique.len());
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Crews::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Every crew with its member count.
    pub async fn member_counts(&self) -> Result<Vec<(crews::Model, u64)>> {
        let crews = self.all().await?;
        let links = self.all_memberships().await?;

        let mut counts: HashMap<i32, u64> = HashMap::new();
        for link in links {
            *counts.entry(link.crew_id).or_default() += 1;
        }

        Ok(crews
            .into_iter()
            .map(|crew| {
                let count = counts.get(&crew.id).copied().unwrap_or(0);
                (crew, count)
            })
            .collect())
    }
}
