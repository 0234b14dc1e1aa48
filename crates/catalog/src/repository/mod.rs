pub mod category;
pub mod product;

#[cfg(test)]
pub mod memory;
