use crate::model::{Product, ProductCategory, ProductWithCategories};
use shared::errors::RepositoryError;
use sqlx::PgConnection;
use std::collections::{HashMap, HashSet};
use tracing::{error, warn};

/// Association rows for the given products, each joined with its category name.
pub(super) async fn load_categories(
    conn: &mut PgConnection,
    product_ids: &[String],
) -> Result<Vec<ProductCategory>, RepositoryError> {
    if product_ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, ProductCategory>(
        r#"
        SELECT pc.product_id, pc.category_id, c.name AS category_name
        FROM product_categories pc
        JOIN categories c ON c.id = pc.category_id
        WHERE pc.product_id = ANY($1)
        ORDER BY c.created_at ASC, c.id ASC
        "#,
    )
    .bind(product_ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| {
        error!("❌ Failed to load product categories: {:?}", e);
        RepositoryError::from(e)
    })
}

/// Groups association rows under their products, keeping product order.
pub(super) fn attach_categories(
    products: Vec<Product>,
    categories: Vec<ProductCategory>,
) -> Vec<ProductWithCategories> {
    let mut by_product: HashMap<String, Vec<ProductCategory>> = HashMap::new();
    for category in categories {
        by_product
            .entry(category.product_id.clone())
            .or_default()
            .push(category);
    }

    products
        .into_iter()
        .map(|product| {
            let categories = by_product.remove(&product.id).unwrap_or_default();
            ProductWithCategories {
                product,
                categories,
            }
        })
        .collect()
}

pub(super) async fn ensure_categories_exist(
    conn: &mut PgConnection,
    category_ids: &[String],
) -> Result<(), RepositoryError> {
    if category_ids.is_empty() {
        return Ok(());
    }

    let found: Vec<String> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ANY($1)")
        .bind(category_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to look up categories: {:?}", e);
            RepositoryError::from(e)
        })?;

    let missing = missing_ids(category_ids, &found);
    if missing.is_empty() {
        return Ok(());
    }

    warn!("⚠️ Unknown category IDs: {:?}", missing);
    Err(RepositoryError::ForeignKey(format!(
        "Category not found: {}",
        missing.join(", ")
    )))
}

fn missing_ids(requested: &[String], found: &[String]) -> Vec<String> {
    let found: HashSet<&str> = found.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();

    requested
        .iter()
        .filter(|id| !found.contains(id.as_str()) && seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// Adds links that are not already present. Duplicates in `category_ids` collapse.
pub(super) async fn connect_categories(
    conn: &mut PgConnection,
    product_id: &str,
    category_ids: &[String],
) -> Result<(), RepositoryError> {
    if category_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO product_categories (product_id, category_id)
        SELECT $1, UNNEST($2::TEXT[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(product_id)
    .bind(category_ids)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        error!("❌ Failed to link categories to product {product_id}: {:?}", e);
        RepositoryError::from(e)
    })?;

    Ok(())
}

/// Replaces the product's links with exactly `category_ids`.
pub(super) async fn set_categories(
    conn: &mut PgConnection,
    product_id: &str,
    category_ids: &[String],
) -> Result<(), RepositoryError> {
    sqlx::query("DELETE FROM product_categories WHERE product_id = $1")
        .bind(product_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to clear categories of product {product_id}: {:?}", e);
            RepositoryError::from(e)
        })?;

    connect_categories(conn, product_id, category_ids).await
}
