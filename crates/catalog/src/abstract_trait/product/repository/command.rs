use crate::model::ProductWithCategories;
use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    errors::RepositoryError,
};
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    /// Inserts the row and connects `category_ids` when the list is non-empty.
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductWithCategories, RepositoryError>;
    /// Overwrites the present scalar fields and, when `category_ids` is
    /// present, sets the association to exactly that list.
    async fn update_product(
        &self,
        id: &str,
        req: &UpdateProductRequest,
    ) -> Result<ProductWithCategories, RepositoryError>;
    async fn delete_product(&self, id: &str) -> Result<(), RepositoryError>;
}
