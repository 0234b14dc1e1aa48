use crate::{
    abstract_trait::{
        category::{DynCategoryQueryRepository, DynCategoryQueryService},
        product::{
            repository::{DynProductCommandRepository, DynProductQueryRepository},
            service::{DynProductCommandService, DynProductQueryService},
        },
    },
    repository::{
        category::CategoryQueryRepository,
        product::{ProductCommandRepository, ProductQueryRepository},
    },
    service::{
        category::CategoryQueryService,
        product::{ProductCommandService, ProductQueryService},
    },
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub category_query: DynCategoryQueryService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .field("category_query", &"CategoryQueryService")
            .finish()
    }
}

/// Storage gateways the services are built on.
#[derive(Clone)]
pub struct Repositories {
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub category_query: DynCategoryQueryRepository,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            product_query: Arc::new(ProductQueryRepository::new(pool.clone())),
            product_command: Arc::new(ProductCommandRepository::new(pool.clone())),
            category_query: Arc::new(CategoryQueryRepository::new(pool)),
        }
    }
}

impl DependenciesInject {
    pub fn new(pool: ConnectionPool, registry: &mut Registry) -> Result<Self> {
        Self::from_repositories(Repositories::postgres(pool), registry)
    }

    pub fn from_repositories(repos: Repositories, registry: &mut Registry) -> Result<Self> {
        let Repositories {
            product_query,
            product_command,
            category_query,
        } = repos;

        let product_query_service = ProductQueryService::new(product_query.clone(), registry)
            .context("failed initialize product query")?;

        let product_command_service =
            ProductCommandService::new(product_query, product_command, registry)
                .context("failed initialize product command")?;

        let category_query_service = CategoryQueryService::new(category_query, registry)
            .context("failed initialize category query")?;

        Ok(Self {
            product_query: Arc::new(product_query_service),
            product_command: Arc::new(product_command_service),
            category_query: Arc::new(category_query_service),
        })
    }
}
