use super::association::{
    attach_categories, connect_categories, ensure_categories_exist, load_categories,
    set_categories,
};
use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    model::{Product as ProductModel, ProductWithCategories},
};
use async_trait::async_trait;
use shared::{
    config::ConnectionPool,
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    errors::RepositoryError,
};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductWithCategories, RepositoryError> {
        info!("🆕 Creating product: {}", req.name);

        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        let category_ids = req.category_ids.as_deref().unwrap_or_default();
        ensure_categories_exist(&mut *tx, category_ids).await?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (id, name, qty, price, photo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, qty, price, photo, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&req.name)
        .bind(req.qty)
        .bind(req.price)
        .bind(&req.photo)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to create product '{}': {:?}", req.name, e);
            RepositoryError::from(e)
        })?;

        connect_categories(&mut *tx, &product.id, category_ids).await?;
        let categories = load_categories(&mut *tx, &[product.id.clone()]).await?;

        tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit product creation: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Created product ID: {}", product.id);

        attach_categories(vec![product], categories)
            .pop()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update_product(
        &self,
        id: &str,
        req: &UpdateProductRequest,
    ) -> Result<ProductWithCategories, RepositoryError> {
        info!("🔄 Updating product ID: {id}");

        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        if let Some(category_ids) = req.category_ids.as_deref() {
            ensure_categories_exist(&mut *tx, category_ids).await?;
        }

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                qty = COALESCE($3, qty),
                price = COALESCE($4, price),
                photo = COALESCE($5, photo),
                updated_at = clock_timestamp()
            WHERE id = $1
            RETURNING id, name, qty, price, photo, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(req.name.as_deref())
        .bind(req.qty)
        .bind(req.price)
        .bind(req.photo.as_deref())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to update product {id}: {:?}", e);
            RepositoryError::from(e)
        })?
        .ok_or_else(|| {
            error!("❌ Product ID {id} not found for update");
            RepositoryError::NotFound
        })?;

        if let Some(category_ids) = req.category_ids.as_deref() {
            set_categories(&mut *tx, id, category_ids).await?;
        }

        let categories = load_categories(&mut *tx, &[product.id.clone()]).await?;

        tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit product update: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Updated product ID: {id}");

        attach_categories(vec![product], categories)
            .pop()
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete_product(&self, id: &str) -> Result<(), RepositoryError> {
        info!("🗑️ Deleting product ID: {id}");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {id}: {:?}", e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            error!("❌ Product ID {id} not found for delete");
            return Err(RepositoryError::NotFound);
        }

        info!("✅ Deleted product ID: {id}");

        Ok(())
    }
}
