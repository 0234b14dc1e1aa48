//! In-process stand-in for the Postgres repositories, used by service and
//! router tests.

use crate::{
    abstract_trait::{
        category::{CategoryCommandRepositoryTrait, CategoryQueryRepositoryTrait},
        product::repository::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
    },
    model::{Category, Product, ProductCategory, ProductWithCategories},
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime};
use shared::{
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    errors::RepositoryError,
};
use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicUsize, Ordering},
};
use uuid::Uuid;

#[derive(Default)]
struct State {
    categories: Vec<Category>,
    products: Vec<Product>,
    links: Vec<(String, String)>,
    clock: i64,
}

impl State {
    fn tick(&mut self) -> NaiveDateTime {
        self.clock += 1;
        DateTime::from_timestamp(self.clock, 0)
            .unwrap_or_default()
            .naive_utc()
    }

    fn ensure_categories_exist(&self, ids: &[String]) -> Result<(), RepositoryError> {
        let mut missing: Vec<&str> = Vec::new();
        for id in ids {
            let known = self.categories.iter().any(|c| &c.id == id);
            if !known && !missing.contains(&id.as_str()) {
                missing.push(id);
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RepositoryError::ForeignKey(format!(
                "Category not found: {}",
                missing.join(", ")
            )))
        }
    }

    fn connect(&mut self, product_id: &str, category_ids: &[String]) {
        for category_id in category_ids {
            let exists = self
                .links
                .iter()
                .any(|(p, c)| p == product_id && c == category_id);
            if !exists {
                self.links
                    .push((product_id.to_string(), category_id.clone()));
            }
        }
    }

    fn with_categories(&self, product: &Product) -> ProductWithCategories {
        let mut categories: Vec<&Category> = self
            .links
            .iter()
            .filter(|(p, _)| p == &product.id)
            .filter_map(|(_, c)| self.categories.iter().find(|cat| &cat.id == c))
            .collect();
        categories.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));

        ProductWithCategories {
            product: product.clone(),
            categories: categories
                .into_iter()
                .map(|c| ProductCategory {
                    product_id: product.id.clone(),
                    category_id: c.id.clone(),
                    category_name: c.name.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<Mutex<State>>,
    update_calls: Arc<AtomicUsize>,
    delete_calls: Arc<AtomicUsize>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Inserts a category under a caller-chosen id without checking the parent.
    pub fn insert_category(&self, id: &str, name: &str, parent_category_id: Option<&str>) {
        let mut state = self.lock();
        let created_at = state.tick();
        state.categories.push(Category {
            id: id.to_string(),
            name: name.to_string(),
            parent_category_id: parent_category_id.map(str::to_string),
            created_at,
        });
    }

    pub fn link_count(&self) -> usize {
        self.lock().links.len()
    }

    pub fn product_count(&self) -> usize {
        self.lock().products.len()
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CategoryQueryRepositoryTrait for InMemoryCatalog {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let mut categories = self.lock().categories.clone();
        categories.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(categories)
    }
}

#[async_trait]
impl CategoryCommandRepositoryTrait for InMemoryCatalog {
    async fn create_category(
        &self,
        name: &str,
        parent_category_id: Option<&str>,
    ) -> Result<Category, RepositoryError> {
        let mut state = self.lock();

        if let Some(parent) = parent_category_id {
            state.ensure_categories_exist(&[parent.to_string()])?;
        }

        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            parent_category_id: parent_category_id.map(str::to_string),
            created_at: state.tick(),
        };
        state.categories.push(category.clone());

        Ok(category)
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let mut state = self.lock();
        let removed = state.categories.len() as u64;
        state.categories.clear();
        state.links.clear();
        Ok(removed)
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryCatalog {
    async fn find_all(
        &self,
        name: Option<&str>,
    ) -> Result<Vec<ProductWithCategories>, RepositoryError> {
        let state = self.lock();
        let mut products: Vec<&Product> = state
            .products
            .iter()
            .filter(|p| name.is_none_or(|needle| p.name.contains(needle)))
            .collect();
        products.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));

        Ok(products
            .into_iter()
            .map(|p| state.with_categories(p))
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ProductWithCategories>, RepositoryError> {
        let state = self.lock();
        Ok(state
            .products
            .iter()
            .find(|p| p.id == id)
            .map(|p| state.with_categories(p)))
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryCatalog {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductWithCategories, RepositoryError> {
        let mut state = self.lock();
        let category_ids = req.category_ids.as_deref().unwrap_or_default();
        state.ensure_categories_exist(category_ids)?;

        let now = state.tick();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: req.name.clone(),
            qty: req.qty,
            price: req.price,
            photo: req.photo.clone(),
            created_at: now,
            updated_at: now,
        };
        state.products.push(product.clone());
        state.connect(&product.id, category_ids);

        Ok(state.with_categories(&product))
    }

    async fn update_product(
        &self,
        id: &str,
        req: &UpdateProductRequest,
    ) -> Result<ProductWithCategories, RepositoryError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();

        if let Some(category_ids) = req.category_ids.as_deref() {
            state.ensure_categories_exist(category_ids)?;
        }

        let now = state.tick();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = &req.name {
            product.name = name.clone();
        }
        if let Some(qty) = req.qty {
            product.qty = qty;
        }
        if let Some(price) = req.price {
            product.price = price;
        }
        if let Some(photo) = &req.photo {
            product.photo = photo.clone();
        }
        product.updated_at = now;
        let product = product.clone();

        if let Some(category_ids) = req.category_ids.as_deref() {
            state.links.retain(|(p, _)| p != id);
            state.connect(id, category_ids);
        }

        Ok(state.with_categories(&product))
    }

    async fn delete_product(&self, id: &str) -> Result<(), RepositoryError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();

        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        if state.products.len() == before {
            return Err(RepositoryError::NotFound);
        }
        state.links.retain(|(p, _)| p != id);

        Ok(())
    }
}
