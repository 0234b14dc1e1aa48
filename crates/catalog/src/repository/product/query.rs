use super::association::{attach_categories, load_categories};
use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    model::{Product as ProductModel, ProductWithCategories},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(
        &self,
        name: Option<&str>,
    ) -> Result<Vec<ProductWithCategories>, RepositoryError> {
        info!("🔍 Fetching all products with name filter: {:?}", name);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let products = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, qty, price, photo, created_at, updated_at
            FROM products
            WHERE ($1::TEXT IS NULL OR strpos(name, $1) > 0)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(name)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {:?}", e);
            RepositoryError::from(e)
        })?;

        let ids: Vec<String> = products.iter().map(|p| p.id.clone()).collect();
        let categories = load_categories(&mut *conn, &ids).await?;

        info!("✅ Retrieved {} products", products.len());

        Ok(attach_categories(products, categories))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ProductWithCategories>, RepositoryError> {
        info!("🆔 Fetching product by ID: {id}");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, qty, price, photo, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product {id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        let Some(product) = product else {
            info!("ℹ️ Product ID {id} not found");
            return Ok(None);
        };

        let categories = load_categories(&mut *conn, &[product.id.clone()]).await?;

        Ok(attach_categories(vec![product], categories).pop())
    }
}
