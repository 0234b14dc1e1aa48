use crate::error::ClientError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, de::DeserializeOwned};
use shared::domain::{
    requests::{CreateProductRequest, UpdateProductRequest},
    responses::{ApiResponse, CategoryResponse, ProductResponse},
};
use tracing::{debug, error};

/// Client view of the catalog HTTP API.
#[async_trait]
pub trait CatalogApi {
    async fn list_products(&self, name: Option<&str>) -> Result<Vec<ProductResponse>, ClientError>;
    async fn get_product(&self, id: &str) -> Result<ProductResponse, ClientError>;
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ClientError>;
    async fn update_product(
        &self,
        id: &str,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ClientError>;
    async fn delete_product(&self, id: &str) -> Result<ProductResponse, ClientError>;
    async fn list_categories(&self) -> Result<Vec<CategoryResponse>, ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Appends `segments` to the base path, percent-encoding each one so an
    /// id never spills into a neighbouring route.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| {
                    if body.is_empty() {
                        status.canonical_reason().unwrap_or("request failed").to_string()
                    } else {
                        body
                    }
                });

            error!("❌ Catalog API returned {status}: {message}");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> = response.json().await?;
        debug!("Catalog API: {}", envelope.message);

        Ok(envelope.data)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_products(&self, name: Option<&str>) -> Result<Vec<ProductResponse>, ClientError> {
        let mut request = self.client.get(self.url(&["product"])?);
        if let Some(name) = name {
            request = request.query(&[("name", name)]);
        }
        self.send(request).await
    }

    async fn get_product(&self, id: &str) -> Result<ProductResponse, ClientError> {
        self.send(self.client.get(self.url(&["product", id])?))
            .await
    }

    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ClientError> {
        self.send(self.client.post(self.url(&["product"])?).json(req))
            .await
    }

    async fn update_product(
        &self,
        id: &str,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ClientError> {
        self.send(
            self.client
                .patch(self.url(&["product", id])?)
                .json(req),
        )
        .await
    }

    async fn delete_product(&self, id: &str) -> Result<ProductResponse, ClientError> {
        self.send(self.client.delete(self.url(&["product", id])?))
            .await
    }

    async fn list_categories(&self) -> Result<Vec<CategoryResponse>, ClientError> {
        self.send(self.client.get(self.url(&["category"])?)).await
    }
}
