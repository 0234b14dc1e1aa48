//! Client-side view of the catalog service: an HTTP client, a local product
//! list, and a synchroniser that keeps the two in step.

mod api;
mod error;
mod store;
mod storefront;

pub use self::api::{CatalogApi, HttpCatalogClient};
pub use self::error::ClientError;
pub use self::store::ProductStore;
pub use self::storefront::Storefront;
