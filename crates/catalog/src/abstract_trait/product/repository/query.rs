use crate::model::ProductWithCategories;
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_all(
        &self,
        name: Option<&str>,
    ) -> Result<Vec<ProductWithCategories>, RepositoryError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ProductWithCategories>, RepositoryError>;
}
