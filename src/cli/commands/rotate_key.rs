use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, SeaOrmAuthService};

pub async fn cmd_rotate_key(config: &Config, username: &str) -> anyhow::Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    let auth = SeaOrmAuthService::new(store);

    let api_key = auth.rotate_api_key(username).await?;

    println!("✓ New API key for {username}:");
    println!("  {api_key}");

    Ok(())
}
