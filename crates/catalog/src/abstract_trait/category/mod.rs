mod repository;
mod service;

pub use self::repository::{
    CategoryCommandRepositoryTrait, CategoryQueryRepositoryTrait, DynCategoryQueryRepository,
};
pub use self::service::{CategoryQueryServiceTrait, DynCategoryQueryService};
