use super::forest::build_category_forest;
use crate::abstract_trait::category::{CategoryQueryServiceTrait, DynCategoryQueryRepository};
use anyhow::Result;
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::{ApiResponse, CategoryResponse},
    errors::ServiceError,
    utils::{Method, Metrics, ServiceTelemetry},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct CategoryQueryService {
    query: DynCategoryQueryRepository,
    telemetry: ServiceTelemetry,
}

impl CategoryQueryService {
    pub fn new(query: DynCategoryQueryRepository, registry: &mut Registry) -> Result<Self> {
        let metrics = Metrics::new();
        metrics.register(
            registry,
            "category_query_service",
            "CategoryQueryService",
        );

        Ok(Self {
            query,
            telemetry: ServiceTelemetry::new("category-query-service", metrics),
        })
    }
}

#[async_trait]
impl CategoryQueryServiceTrait for CategoryQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError> {
        info!("🌳 Building category tree");

        let tracing_ctx = self.telemetry.start_tracing(
            "FindAllCategories",
            vec![KeyValue::new("component", "category")],
        );

        let rows = match self.query.find_all().await {
            Ok(rows) => rows,
            Err(e) => {
                error!("❌ Failed to fetch categories: {e:?}");
                self.telemetry.complete_tracing_error(
                    &tracing_ctx,
                    Method::Get,
                    "Failed to fetch categories",
                );
                return Err(ServiceError::Repo(e));
            }
        };

        let total = rows.len();
        let forest = build_category_forest(rows);

        self.telemetry.complete_tracing_success(
            &tracing_ctx,
            Method::Get,
            &format!("Built category tree with {} roots from {total} rows", forest.len()),
        );

        Ok(ApiResponse::success("Categories retrieved successfully", forest))
    }
}
