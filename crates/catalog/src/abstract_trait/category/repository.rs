use crate::model::Category as CategoryModel;
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynCategoryQueryRepository = Arc<dyn CategoryQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CategoryQueryRepositoryTrait {
    /// Every category as a flat row, in insertion order.
    async fn find_all(&self) -> Result<Vec<CategoryModel>, RepositoryError>;
}

#[async_trait]
pub trait CategoryCommandRepositoryTrait {
    async fn create_category(
        &self,
        name: &str,
        parent_category_id: Option<&str>,
    ) -> Result<CategoryModel, RepositoryError>;
    async fn delete_all(&self) -> Result<u64, RepositoryError>;
}
