use crate::entities::prelude::*;
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, TransactionTrait};
use serde::Serialize;
use tracing::info;

/// Row counts for every catalog table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub arcs: u64,
    pub episodes: u64,
    pub crews: u64,
    pub characters: u64,
    pub devil_fruits: u64,
    pub fruit_holders: u64,
}

/// Operations spanning the whole catalog.
pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn counts(&self) -> Result<CatalogCounts> {
        Ok(CatalogCounts {
            arcs: Arcs::find().count(&self.conn).await?,
            episodes: Episodes::find().count(&self.conn).await?,
            crews: Crews::find().count(&self.conn).await?,
            characters: Characters::find().count(&self.conn).await?,
            devil_fruits: DevilFruits::find().count(&self.conn).await?,
            fruit_holders: FruitHolders::find().count(&self.conn).await?,
        })
    }

    /// Empties every catalog table, children before parents.
    pub async fn reset(&self) -> Result<()> {
        let txn = self.conn.begin().await?;

        FruitHolders::delete_many().exec(&txn).await?;
        CrewMembers::delete_many().exec(&txn).await?;
        Characters::delete_many().exec(&txn).await?;
        Crews::delete_many().exec(&txn).await?;
        DevilFruits::delete_many().exec(&txn).await?;
        Episodes::delete_many().exec(&txn).await?;
        Arcs::delete_many().exec(&txn).await?;

        txn.commit().await?;
        info!("Catalog reset");
        Ok(())
    }
}
