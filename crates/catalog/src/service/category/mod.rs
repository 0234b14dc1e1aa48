mod forest;
mod query;

pub use self::forest::build_category_forest;
pub use self::query::CategoryQueryService;
