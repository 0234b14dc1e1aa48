mod api;
mod category;
mod product;

pub use self::api::ApiResponse;
pub use self::category::CategoryResponse;
pub use self::product::{CategorySummary, ProductResponse};
