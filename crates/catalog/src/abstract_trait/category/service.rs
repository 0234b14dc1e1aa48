use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::responses::{ApiResponse, CategoryResponse},
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynCategoryQueryService = Arc<dyn CategoryQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait CategoryQueryServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError>;
}
