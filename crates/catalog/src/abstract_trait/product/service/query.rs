use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::{
        requests::FindAllProducts,
        responses::{ApiResponse, ProductResponse},
    },
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<ApiResponse<ProductResponse>, ServiceError>;
}
