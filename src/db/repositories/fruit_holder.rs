use crate::entities::{characters, devil_fruits, fruit_holders, prelude::*};
use crate::models::catalog::HolderInput;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set, TransactionTrait, sea_query::Expr,
};
use std::collections::HashMap;
use tracing::info;

/// Repository for devil fruit ownership history.
///
/// Every write goes through [`FruitHolderRepository::save`], which keeps at
/// most one current holder per fruit.
pub struct FruitHolderRepository {
    conn: DatabaseConnection,
}

impl FruitHolderRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Natural order of holder rows: current first, then most recent start.
    fn ordered(select: Select<FruitHolders>) -> Select<FruitHolders> {
        select
            .order_by_desc(fruit_holders::Column::IsCurrent)
            .order_by_desc(fruit_holders::Column::FromDate)
            .order_by_asc(fruit_holders::Column::Id)
    }

    pub async fn get(&self, id: i32) -> Result<Option<fruit_holders::Model>> {
        Ok(FruitHolders::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn all(&self) -> Result<Vec<fruit_holders::Model>> {
        Ok(Self::ordered(FruitHolders::find()).all(&self.conn).await?)
    }

    /// Creates (`id = None`) or updates a holder row.
    ///
    /// When the row is current, every other current row of the same fruit is
    /// demoted first, in the same transaction. A takeover is never an error.
    /// Returns `None` when updating an id that does not exist.
    pub async fn save(
        &self,
        id: Option<i32>,
        input: &HolderInput,
    ) -> Result<Option<fruit_holders::Model>> {
        let txn = self.conn.begin().await?;

        if let Some(id) = id
            && FruitHolders::find_by_id(id).one(&txn).await?.is_none()
        {
            return Ok(None);
        }

        if input.is_current {
            let mut demote = FruitHolders::update_many()
                .col_expr(fruit_holders::Column::IsCurrent, Expr::value(false))
                .filter(fruit_holders::Column::DevilFruitId.eq(input.devil_fruit_id))
                .filter(fruit_holders::Column::IsCurrent.eq(true));
            if let Some(id) = id {
                demote = demote.filter(fruit_holders::Column::Id.ne(id));
            }

            let demoted = demote.exec(&txn).await?;
            if demoted.rows_affected > 0 {
                info!(
                    "Devil fruit {} changed hands: {} previous holder(s) demoted",
                    input.devil_fruit_id, demoted.rows_affected
                );
            }
        }

        let mut active = fruit_holders::ActiveModel {
            devil_fruit_id: Set(input.devil_fruit_id),
            character_id: Set(input.character_id),
            from_date: Set(input.from_date),
            to_date: Set(input.to_date),
            is_current: Set(input.is_current),
            ..Default::default()
        };

        let model = match id {
            Some(id) => {
                active.id = Set(id);
                match active.update(&txn).await {
                    Ok(model) => model,
                    Err(DbErr::RecordNotUpdated) => return Ok(None),
                    Err(e) => return Err(e.into()),
                }
            }
            None => active.insert(&txn).await?,
        };

        txn.commit().await?;
        Ok(Some(model))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = FruitHolders::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Holders of one fruit with the holding character.
    pub async fn for_fruit(
        &self,
        devil_fruit_id: i32,
    ) -> Result<Vec<(fruit_holders::Model, Option<characters::Model>)>> {
        let select =
            FruitHolders::find().filter(fruit_holders::Column::DevilFruitId.eq(devil_fruit_id));

        Ok(Self::ordered(select)
            .find_also_related(Characters)
            .all(&self.conn)
            .await?)
    }

    /// Fruits one character has held.
    pub async fn for_character(
        &self,
        character_id: i32,
    ) -> Result<Vec<(fruit_holders::Model, Option<devil_fruits::Model>)>> {
        let select =
            FruitHolders::find().filter(fruit_holders::Column::CharacterId.eq(character_id));

        Ok(Self::ordered(select)
            .find_also_related(DevilFruits)
            .all(&self.conn)
            .await?)
    }

    /// Fruits currently held by each requested character.
    pub async fn current_fruits_for(
        &self,
        character_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<devil_fruits::Model>>> {
        if character_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let select = FruitHolders::find()
            .filter(fruit_holders::Column::CharacterId.is_in(character_ids.to_vec()))
            .filter(fruit_holders::Column::IsCurrent.eq(true));

        let rows = Self::ordered(select)
            .find_also_related(DevilFruits)
            .all(&self.conn)
            .await?;

        let mut by_character: HashMap<i32, Vec<devil_fruits::Model>> = HashMap::new();
        for (holder, fruit) in rows {
            if let Some(fruit) = fruit {
                by_character.entry(holder.character_id).or_default().push(fruit);
            }
        }

        Ok(by_character)
    }

    pub async fn count_current(&self, devil_fruit_id: i32) -> Result<u64> {
        Ok(FruitHolders::find()
            .filter(fruit_holders::Column::DevilFruitId.eq(devil_fruit_id))
            .filter(fruit_holders::Column::IsCurrent.eq(true))
            .count(&self.conn)
            .await?)
    }
}
