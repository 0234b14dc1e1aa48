use shared::domain::responses::ProductResponse;

/// The complete product list as the client last saw it.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Vec<ProductResponse>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[ProductResponse] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&ProductResponse> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn set_products(&mut self, products: Vec<ProductResponse>) {
        self.products = products;
    }

    pub fn add_product(&mut self, product: ProductResponse) {
        self.products.push(product);
    }

    /// Replaces the held entry with the server's representation. Unknown ids
    /// are ignored.
    pub fn update_product(&mut self, id: &str, product: ProductResponse) {
        if let Some(existing) = self.products.iter_mut().find(|p| p.id == id) {
            *existing = product;
        }
    }

    pub fn delete_product(&mut self, id: &str) {
        self.products.retain(|p| p.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> ProductResponse {
        ProductResponse {
            id: id.into(),
            name: name.into(),
            qty: 1,
            price: 10.0,
            photo: format!("{id}.jpg"),
            categories: vec![],
        }
    }

    #[test]
    fn set_replaces_the_whole_list() {
        let mut store = ProductStore::new();
        store.add_product(product("old", "Old"));

        store.set_products(vec![product("a", "A"), product("b", "B")]);

        assert_eq!(store.len(), 2);
        assert!(store.get("old").is_none());
    }

    #[test]
    fn add_appends() {
        let mut store = ProductStore::new();
        store.add_product(product("a", "A"));
        store.add_product(product("b", "B"));

        let ids: Vec<&str> = store.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn update_replaces_matching_entry_in_place() {
        let mut store = ProductStore::new();
        store.set_products(vec![product("a", "A"), product("b", "B")]);

        store.update_product("a", product("a", "Renamed"));
        store.update_product("ghost", product("ghost", "Ghost"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.products()[0].name, "Renamed");
        assert!(store.get("ghost").is_none());
    }

    #[test]
    fn delete_removes_and_ignores_unknown_ids() {
        let mut store = ProductStore::new();
        store.set_products(vec![product("a", "A")]);

        store.delete_product("ghost");
        assert_eq!(store.len(), 1);

        store.delete_product("a");
        assert!(store.is_empty());
    }
}
