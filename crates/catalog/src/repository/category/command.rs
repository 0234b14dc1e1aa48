use crate::{
    abstract_trait::category::CategoryCommandRepositoryTrait, model::Category as CategoryModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct CategoryCommandRepository {
    db: ConnectionPool,
}

impl CategoryCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryCommandRepositoryTrait for CategoryCommandRepository {
    async fn create_category(
        &self,
        name: &str,
        parent_category_id: Option<&str>,
    ) -> Result<CategoryModel, RepositoryError> {
        info!("🆕 Creating category: {name} (parent: {parent_category_id:?})");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let category = sqlx::query_as::<_, CategoryModel>(
            r#"
            INSERT INTO categories (id, name, parent_category_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, parent_category_id, created_at
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(parent_category_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to create category '{name}': {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Created category ID: {}", category.id);

        Ok(category)
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        info!("🧹 Deleting all categories");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let result = sqlx::query("DELETE FROM categories")
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete categories: {:?}", e);
                RepositoryError::from(e)
            })?;

        info!("🗑️ Deleted {} categories", result.rows_affected());

        Ok(result.rows_affected())
    }
}
