use crate::{abstract_trait::category::CategoryCommandRepositoryTrait, model::Category};
use shared::errors::RepositoryError;
use tracing::info;

/// Root categories and their children written by the seed routine.
pub const SEED_TREE: &[(&str, &[&str])] = &[
    ("Electronics", &["Computers", "Smartphones"]),
    ("Furniture", &["Chairs", "Tables"]),
];

/// Clears every category and recreates [`SEED_TREE`]. Returns the rows in
/// creation order.
pub async fn seed_categories<R>(repo: &R) -> Result<Vec<Category>, RepositoryError>
where
    R: CategoryCommandRepositoryTrait + ?Sized,
{
    let removed = repo.delete_all().await?;
    info!("🧹 Removed {removed} existing categories");

    let mut created = Vec::new();
    for (root, children) in SEED_TREE {
        let parent = repo.create_category(root, None).await?;
        let parent_id = parent.id.clone();
        created.push(parent);

        for child in *children {
            created.push(repo.create_category(child, Some(&parent_id)).await?);
        }
    }

    info!("🌱 Seeded {} categories", created.len());

    Ok(created)
}
