use anyhow::{Context, Result};
use catalog::{
    config::{Config, run_migrations},
    handler::AppRouter,
    state::AppState,
};
use dotenv::dotenv;
use shared::{
    config::ConnectionManager,
    utils::{Telemetry, init_logger},
};
use tracing::{error, info};

const SERVICE_NAME: &str = "catalog-service";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let mut telemetry = config
        .otel_endpoint
        .clone()
        .map(|endpoint| Telemetry::new(SERVICE_NAME, endpoint));

    let logger_provider = match telemetry.as_mut() {
        Some(telemetry) => {
            let logger_provider = telemetry.init_logger()?;
            telemetry.init_tracer()?;
            Some(logger_provider)
        }
        None => None,
    };

    init_logger(
        logger_provider.as_ref(),
        SERVICE_NAME,
        config.is_dev,
        config.enable_file_log,
    )?;

    info!("🚀 Starting Catalog Service initialization...");

    let db_pool =
        ConnectionManager::new_pool(&config.database_url, config.db_min_conn, config.db_max_conn)
            .await
            .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool).await?;
    }

    let state = AppState::new(db_pool).context("Failed to create AppState")?;

    info!("✅ Application setup completed successfully.");

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("🛑 Shutting down Catalog Service...");

    if let Some(telemetry) = telemetry {
        if let Err(e) = telemetry.shutdown().await {
            error!("Failed to shutdown telemetry: {e}");
        }
    }

    Ok(())
}
