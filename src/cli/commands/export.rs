use std::path::PathBuf;

use crate::config::Config;
use crate::db::Store;
use crate::services::dump;

pub async fn cmd_export(config: &Config, output_dir: Option<&str>) -> anyhow::Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    let dir = PathBuf::from(output_dir.unwrap_or(&config.exports.exports_path));

    let report = dump::export_json(&store, &dir, chrono::Local::now().naive_local()).await?;
    let counts = report.counts;

    println!("✓ Exported to {}", report.path.display());
    println!("  Arcs:          {}", counts.arcs);
    println!("  Episodes:      {}", counts.episodes);
    println!("  Crews:         {}", counts.crews);
    println!("  Characters:    {}", counts.characters);
    println!("  Devil fruits:  {}", counts.devil_fruits);
    println!("  Fruit holders: {}", counts.fruit_holders);

    Ok(())
}
