use crate::abstract_trait::product::{
    repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
};
use anyhow::Result;
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::{
        requests::FindAllProducts,
        responses::{ApiResponse, ProductResponse},
    },
    errors::ServiceError,
    utils::{Method, Metrics, ServiceTelemetry},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    query: DynProductQueryRepository,
    telemetry: ServiceTelemetry,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Result<Self> {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service", "ProductQueryService");

        Ok(Self {
            query,
            telemetry: ServiceTelemetry::new("product-query-service", metrics),
        })
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let name = req.name_filter();
        info!("🔍 Listing products | name filter: {:?}", name);

        let tracing_ctx = self.telemetry.start_tracing(
            "FindAllProducts",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("name_filter", name.unwrap_or_default().to_string()),
            ],
        );

        let products = match self.query.find_all(name).await {
            Ok(products) => products,
            Err(e) => {
                error!("❌ Failed to list products: {e:?}");
                self.telemetry.complete_tracing_error(
                    &tracing_ctx,
                    Method::Get,
                    "Failed to list products",
                );
                return Err(ServiceError::Repo(e));
            }
        };

        let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

        self.telemetry.complete_tracing_success(
            &tracing_ctx,
            Method::Get,
            &format!("Found {} products", data.len()),
        );

        Ok(ApiResponse::success("Products retrieved successfully", data))
    }

    async fn find_by_id(&self, id: &str) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆔 Fetching product by ID: {id}");

        let tracing_ctx = self.telemetry.start_tracing(
            "FindProductById",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match self.query.find_by_id(id).await {
            Ok(Some(product)) => {
                self.telemetry.complete_tracing_success(
                    &tracing_ctx,
                    Method::Get,
                    "Product retrieved successfully",
                );
                Ok(ApiResponse::success(
                    "Product retrieved successfully",
                    ProductResponse::from(product),
                ))
            }
            Ok(None) => {
                self.telemetry.complete_tracing_error(
                    &tracing_ctx,
                    Method::Get,
                    "Product not found",
                );
                Err(ServiceError::NotFound(format!(
                    "Product with ID {id} not found"
                )))
            }
            Err(e) => {
                error!("❌ Failed to fetch product {id}: {e:?}");
                self.telemetry.complete_tracing_error(
                    &tracing_ctx,
                    Method::Get,
                    "Failed to fetch product",
                );
                Err(ServiceError::Repo(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::product::repository::ProductCommandRepositoryTrait,
        repository::memory::InMemoryCatalog,
    };
    use shared::domain::requests::CreateProductRequest;
    use std::sync::Arc;

    fn create(name: &str) -> CreateProductRequest {
        CreateProductRequest {
            name: name.into(),
            qty: 1,
            price: 10.0,
            photo: format!("{name}.jpg"),
            category_ids: None,
        }
    }

    fn service(repo: &InMemoryCatalog) -> ProductQueryService {
        ProductQueryService::new(Arc::new(repo.clone()), &mut Registry::default()).unwrap()
    }

    #[tokio::test]
    async fn name_filter_is_a_case_sensitive_substring() {
        let repo = InMemoryCatalog::new();
        repo.create_product(&create("Smartphone")).await.unwrap();
        repo.create_product(&create("Laptop")).await.unwrap();
        let service = service(&repo);

        let smart = service
            .find_all(&FindAllProducts {
                name: Some("Smart".into()),
            })
            .await
            .unwrap();
        let names: Vec<&str> = smart.data.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Smartphone"]);

        let lower = service
            .find_all(&FindAllProducts {
                name: Some("smart".into()),
            })
            .await
            .unwrap();
        assert!(lower.data.is_empty());
    }

    #[tokio::test]
    async fn no_or_empty_filter_lists_everything_in_creation_order() {
        let repo = InMemoryCatalog::new();
        repo.create_product(&create("Smartphone")).await.unwrap();
        repo.create_product(&create("Laptop")).await.unwrap();
        let service = service(&repo);

        for req in [
            FindAllProducts::default(),
            FindAllProducts {
                name: Some(String::new()),
            },
        ] {
            let all = service.find_all(&req).await.unwrap();
            let names: Vec<&str> = all.data.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, ["Smartphone", "Laptop"]);
        }
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let service = service(&InMemoryCatalog::new());

        let err = service.find_by_id("missing").await.unwrap_err();

        assert!(
            matches!(err, ServiceError::NotFound(ref msg) if msg == "Product with ID missing not found")
        );
    }
}
