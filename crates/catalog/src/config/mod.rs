mod myconfig;

pub use self::myconfig::Config;

use anyhow::{Context, Result};
use shared::config::ConnectionPool;
use tracing::info;

pub async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    info!("📦 Running database migrations");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(())
}
