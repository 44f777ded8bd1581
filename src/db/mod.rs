use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::catalog::CatalogCounts;
pub use repositories::user::User;
pub use repositories::{ListParams, Page};

use repositories::{
    arc::ArcRepository, catalog::CatalogRepository, character::CharacterRepository,
    crew::CrewRepository, devil_fruit::DevilFruitRepository, episode::EpisodeRepository,
    fruit_holder::FruitHolderRepository, user::UserRepository,
};

/// Shared handle on the catalog database. Cloning is cheap.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // Each pooled connection to `:memory:` opens its own empty database.
        let in_memory = db_url.contains(":memory:");
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        if !in_memory {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn arcs(&self) -> ArcRepository {
        ArcRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn episodes(&self) -> EpisodeRepository {
        EpisodeRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn crews(&self) -> CrewRepository {
        CrewRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn characters(&self) -> CharacterRepository {
        CharacterRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn devil_fruits(&self) -> DevilFruitRepository {
        DevilFruitRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn fruit_holders(&self) -> FruitHolderRepository {
        FruitHolderRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn catalog(&self) -> CatalogRepository {
        CatalogRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.conn.clone())
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.users().verify_api_key(api_key).await
    }

    pub async fn counts(&self) -> Result<CatalogCounts> {
        self.catalog().counts().await
    }
}
