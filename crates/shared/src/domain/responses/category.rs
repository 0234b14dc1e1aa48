use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A category with its descendants nested in insertion order.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub parent_category_id: Option<String>,
    #[serde(default)]
    #[schema(no_recursion)]
    pub child_categories: Vec<CategoryResponse>,
}
