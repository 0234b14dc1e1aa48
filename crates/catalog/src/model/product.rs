use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use shared::domain::responses::{CategorySummary, ProductResponse};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub qty: i32,
    pub price: f64,
    pub photo: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One association row joined with the category it points at.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductCategory {
    pub product_id: String,
    pub category_id: String,
    pub category_name: String,
}

#[derive(Debug, Clone)]
pub struct ProductWithCategories {
    pub product: Product,
    pub categories: Vec<ProductCategory>,
}

impl From<ProductCategory> for CategorySummary {
    fn from(value: ProductCategory) -> Self {
        CategorySummary {
            id: value.category_id,
            name: value.category_name,
        }
    }
}

impl From<ProductWithCategories> for ProductResponse {
    fn from(value: ProductWithCategories) -> Self {
        let ProductWithCategories {
            product,
            categories,
        } = value;

        ProductResponse {
            id: product.id,
            name: product.name,
            qty: product.qty,
            price: product.price,
            photo: product.photo,
            categories: categories.into_iter().map(CategorySummary::from).collect(),
        }
    }
}
