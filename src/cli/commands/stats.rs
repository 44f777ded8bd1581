use crate::config::Config;
use crate::db::Store;

pub async fn cmd_stats(config: &Config) -> anyhow::Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    let counts = store.counts().await?;

    println!("Catalog:");
    println!("{:-<30}", "");
    println!("  Arcs:          {}", counts.arcs);
    println!("  Episodes:      {}", counts.episodes);
    println!("  Crews:         {}", counts.crews);
    println!("  Characters:    {}", counts.characters);
    println!("  Devil fruits:  {}", counts.devil_fruits);
    println!("  Fruit holders: {}", counts.fruit_holders);

    Ok(())
}
