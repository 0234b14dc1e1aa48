use crate::di::DependenciesInject;
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .finish()
    }
}

impl AppState {
    pub fn new(pool: ConnectionPool) -> Result<Self> {
        let mut registry = Registry::default();

        let di_container = DependenciesInject::new(pool, &mut registry)
            .context("Failed to initialize dependency injection container")?;

        Ok(Self::from_parts(di_container, registry))
    }

    pub fn from_parts(di_container: DependenciesInject, registry: Registry) -> Self {
        Self {
            di_container,
            registry: Arc::new(Mutex::new(registry)),
        }
    }
}
