use crate::{api::CatalogApi, error::ClientError, store::ProductStore};
use shared::domain::{
    requests::{CreateProductRequest, UpdateProductRequest},
    responses::{CategoryResponse, ProductResponse},
};
use tracing::info;

/// Pairs a catalog API with a local store. Every mutation goes to the server
/// first; the store is patched only when the call succeeds.
pub struct Storefront<A> {
    api: A,
    store: ProductStore,
}

impl<A: CatalogApi> Storefront<A> {
    pub fn new(api: A, store: ProductStore) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn load(&mut self) -> Result<&[ProductResponse], ClientError> {
        let products = self.api.list_products(None).await?;
        info!("📦 Loaded {} products", products.len());
        self.store.set_products(products);
        Ok(self.store.products())
    }

    /// Products whose name contains `name`, as the server filters them.
    /// The held list is a full copy and is not narrowed by a search.
    pub async fn search(&self, name: &str) -> Result<Vec<ProductResponse>, ClientError> {
        let filter = Some(name).filter(|n| !n.is_empty());
        let products = self.api.list_products(filter).await?;
        info!("🔍 Search {name:?} matched {} products", products.len());
        Ok(products)
    }

    pub async fn create(
        &mut self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ClientError> {
        let product = self.api.create_product(req).await?;
        self.store.add_product(product.clone());
        Ok(product)
    }

    pub async fn update(
        &mut self,
        id: &str,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ClientError> {
        let product = self.api.update_product(id, req).await?;
        self.store.update_product(id, product.clone());
        Ok(product)
    }

    pub async fn delete(&mut self, id: &str) -> Result<ProductResponse, ClientError> {
        let product = self.api.delete_product(id).await?;
        self.store.delete_product(id);
        Ok(product)
    }

    pub async fn categories(&self) -> Result<Vec<CategoryResponse>, ClientError> {
        self.api.list_categories().await
    }
}
