use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllProducts {
    /// Case-sensitive substring matched against the product name.
    #[serde(default)]
    pub name: Option<String>,
}

impl FindAllProducts {
    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Laptop")]
    pub name: String,

    #[validate(range(min = 1, message = "Quantity must be greater than zero"))]
    #[schema(example = 10)]
    pub qty: i32,

    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than zero"))]
    #[schema(example = 1500.0)]
    pub price: f64,

    #[schema(example = "laptop.jpg")]
    pub photo: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<String>>,
}

/// Partial update. A present `categoryIds` (even empty) replaces the whole
/// association set; an absent or null one leaves it alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Laptop Pro")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Quantity must be greater than zero"))]
    pub qty: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than zero"))]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<String>>,
}
