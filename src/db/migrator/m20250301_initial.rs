use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        create(manager, &schema, Arcs).await?;
        create(manager, &schema, Episodes).await?;
        create(manager, &schema, Characters).await?;
        create(manager, &schema, Crews).await?;
        create(manager, &schema, CrewMembers).await?;
        create(manager, &schema, DevilFruits).await?;
        create(manager, &schema, FruitHolders).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_fruit_holders_fruit_current")
                    .table(FruitHolders)
                    .col(crate::entities::fruit_holders::Column::DevilFruitId)
                    .col(crate::entities::fruit_holders::Column::IsCurrent)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FruitHolders).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DevilFruits).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CrewMembers).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Crews).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Characters).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Episodes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Arcs).to_owned())
            .await?;

        Ok(())
    }
}

async fn create<E>(manager: &SchemaManager<'_>, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await
}
