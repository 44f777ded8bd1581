use crate::config::Config;
use crate::db::Store;
use crate::services::{SeedOptions, Seeder};

pub async fn cmd_seed(config: &Config, options: SeedOptions) -> anyhow::Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    if options.reset {
        println!("Deleting all catalog data...");
    }

    let mut seeder = Seeder::new(store, options.rng_seed);
    let report = seeder.run(&options).await?;

    println!("✓ Catalog seeded");
    println!(
        "  {} characters, {} crews, {} devil fruits, {} arcs, {} episodes",
        report.characters, report.crews, report.devil_fruits, report.arcs, report.episodes
    );
    println!(
        "  {} crew memberships, {} fruit holders",
        report.memberships, report.fruit_holders
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::export::cmd_export;

    #[tokio::test]
    async fn test_seed_and_export_use_configured_pool() {
        let dir = std::env::temp_dir().join(format!("opkb-{}", uuid::Uuid::new_v4().simple()));
        let mut config = Config::default();
        config.general.database_path = format!("sqlite:{}", dir.join("opkb.db").display());
        config.general.max_db_connections = 1;
        config.general.min_db_connections = 1;
        config.exports.exports_path = dir.join("exports").display().to_string();

        let options = SeedOptions {
            characters: 3,
            crews: 1,
            fruits: 2,
            arcs: 1,
            episodes: 5,
            rng_seed: Some(3),
            ..SeedOptions::default()
        };
        cmd_seed(&config, options).await.unwrap();
        cmd_export(&config, None).await.unwrap();

        let exported = std::fs::read_dir(dir.join("exports")).unwrap().count();
        assert_eq!(exported, 1);

        std::fs::remove_dir_all(&dir).ok();
    }
}
