use anyhow::{Context, Result};
use catalog::{
    config::{Config, run_migrations},
    repository::category::CategoryCommandRepository,
    seed::seed_categories,
};
use dotenv::dotenv;
use shared::{config::ConnectionManager, utils::init_logger};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    init_logger(None, "catalog-seed", config.is_dev, false)?;

    let db_pool =
        ConnectionManager::new_pool(&config.database_url, config.db_min_conn, config.db_max_conn)
            .await
            .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool).await?;
    }

    let repo = CategoryCommandRepository::new(db_pool.clone());
    let categories = seed_categories(&repo)
        .await
        .context("Failed to seed categories")?;

    info!("✅ Seed complete: {} categories", categories.len());

    db_pool.close().await;

    Ok(())
}
