mod product;

pub use self::product::{CreateProductRequest, FindAllProducts, UpdateProductRequest};
