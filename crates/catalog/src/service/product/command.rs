use crate::abstract_trait::product::{
    repository::{DynProductCommandRepository, DynProductQueryRepository},
    service::ProductCommandServiceTrait,
};
use crate::model::ProductWithCategories;
use anyhow::Result;
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::{
        requests::{CreateProductRequest, UpdateProductRequest},
        responses::{ApiResponse, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, ServiceTelemetry, TracingContext},
};
use tracing::{error, info};
use validator::Validate;

#[derive(Clone)]
pub struct ProductCommandService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    telemetry: ServiceTelemetry,
}

fn not_found(id: &str) -> ServiceError {
    ServiceError::NotFound(format!("Product with ID {id} not found"))
}

fn from_repo(id: Option<&str>, err: RepositoryError) -> ServiceError {
    match (err, id) {
        (RepositoryError::NotFound, Some(id)) => not_found(id),
        (RepositoryError::ForeignKey(msg), _) => ServiceError::Reference(msg),
        (err, _) => ServiceError::Repo(err),
    }
}

impl ProductCommandService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: &mut Registry,
    ) -> Result<Self> {
        let metrics = Metrics::new();
        metrics.register(
            registry,
            "product_command_service",
            "ProductCommandService",
        );

        Ok(Self {
            query,
            command,
            telemetry: ServiceTelemetry::new("product-command-service", metrics),
        })
    }

    fn fail(&self, ctx: &TracingContext, method: Method, err: ServiceError) -> ServiceError {
        error!("❌ {err}");
        self.telemetry
            .complete_tracing_error(ctx, method, &err.to_string());
        err
    }

    /// Existence check shared by update and delete.
    async fn existing(&self, id: &str) -> Result<ProductWithCategories, ServiceError> {
        match self.query.find_by_id(id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(not_found(id)),
            Err(e) => Err(ServiceError::Repo(e)),
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🏗️ Creating product: {}", req.name);

        let ctx = self.telemetry.start_tracing(
            "CreateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.name", req.name.clone()),
            ],
        );

        if let Err(e) = req.validate() {
            return Err(self.fail(&ctx, Method::Post, ServiceError::from(e)));
        }

        let product = self
            .command
            .create_product(req)
            .await
            .map_err(|e| self.fail(&ctx, Method::Post, from_repo(None, e)))?;

        let response = ProductResponse::from(product);

        self.telemetry.complete_tracing_success(
            &ctx,
            Method::Post,
            &format!("Product created with ID {}", response.id),
        );

        Ok(ApiResponse::success("Product created successfully", response))
    }

    async fn update_product(
        &self,
        id: &str,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔄 Updating product ID: {id}");

        let ctx = self.telemetry.start_tracing(
            "UpdateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        if let Err(e) = req.validate() {
            return Err(self.fail(&ctx, Method::Patch, ServiceError::from(e)));
        }

        self.existing(id)
            .await
            .map_err(|e| self.fail(&ctx, Method::Patch, e))?;

        let product = self
            .command
            .update_product(id, req)
            .await
            .map_err(|e| self.fail(&ctx, Method::Patch, from_repo(Some(id), e)))?;

        self.telemetry.complete_tracing_success(
            &ctx,
            Method::Patch,
            &format!("Product {id} updated"),
        );

        Ok(ApiResponse::success(
            "Product updated successfully",
            ProductResponse::from(product),
        ))
    }

    async fn delete_product(&self, id: &str) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🗑️ Deleting product ID: {id}");

        let ctx = self.telemetry.start_tracing(
            "DeleteProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let existing = self
            .existing(id)
            .await
            .map_err(|e| self.fail(&ctx, Method::Delete, e))?;

        self.command
            .delete_product(id)
            .await
            .map_err(|e| self.fail(&ctx, Method::Delete, from_repo(Some(id), e)))?;

        self.telemetry.complete_tracing_success(
            &ctx,
            Method::Delete,
            &format!("Product {id} deleted"),
        );

        Ok(ApiResponse::success(
            "Product deleted successfully",
            ProductResponse::from(existing),
        ))
    }
}
