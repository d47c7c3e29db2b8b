//! In-memory product list.

use chrono::{DateTime, Utc};
use gemini_store_core::{Product, ProductId};

/// The catalog's products, newest first.
///
/// Identifiers are unique: creates go through [`ProductStore::next_product_id`].
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    /// Create a store holding `products` in the given order.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Insert a product at the front.
    pub fn add(&mut self, product: Product) {
        self.products.insert(0, product);
    }

    /// Replace the product with the same id.
    ///
    /// Returns `false` and leaves the store untouched when no product has that
    /// id.
    pub fn update(&mut self, product: Product) -> bool {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => {
                *slot = product;
                true
            }
            None => false,
        }
    }

    /// Remove the product with this id, if present.
    pub fn remove(&mut self, id: &ProductId) {
        self.products.retain(|p| &p.id != id);
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// A fresh id of the form `prod-<unix millis>`.
    ///
    /// If that id is taken (two creates in the same millisecond, or a
    /// generated product that happens to use it) a `-2`, `-3`, ... suffix is
    /// appended.
    #[must_use]
    pub fn next_product_id(&self, now: DateTime<Utc>) -> ProductId {
        let base = format!("prod-{}", now.timestamp_millis());
        let mut candidate = ProductId::new(base.clone());
        let mut suffix = 2_u32;
        while self.contains(&candidate) {
            candidate = ProductId::new(format!("{base}-{suffix}"));
            suffix += 1;
        }
        candidate
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use gemini_store_core::Price;
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: String::new(),
            price: Price::usd(Decimal::new(1000, 2)),
            category: "Books".to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_add_inserts_at_front() {
        let mut store = ProductStore::new(vec![product("a", "A"), product("b", "B")]);
        store.add(product("c", "C"));

        let ids: Vec<&str> = store.all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut store = ProductStore::new(vec![product("a", "A"), product("b", "B")]);
        assert!(store.update(product("b", "Renamed")));

        assert_eq!(store.all()[1].name, "Renamed");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_unknown_id_leaves_store_unchanged() {
        let mut store = ProductStore::new(vec![product("a", "A")]);
        assert!(!store.update(product("zzz", "Ghost")));

        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].name, "A");
        assert!(!store.contains(&ProductId::new("zzz")));
    }

    #[test]
    fn test_remove() {
        let mut store = ProductStore::new(vec![product("a", "A"), product("b", "B")]);
        store.remove(&ProductId::new("a"));
        store.remove(&ProductId::new("missing"));

        assert_eq!(store.len(), 1);
        assert!(store.get(&ProductId::new("a")).is_none());
        assert!(store.get(&ProductId::new("b")).is_some());
    }

    #[test]
    fn test_next_product_id_is_time_based_and_unique() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let mut store = ProductStore::default();

        let first = store.next_product_id(now);
        assert_eq!(first.as_str(), "prod-1700000000123");

        store.add(product(first.as_str(), "First"));
        let second = store.next_product_id(now);
        assert_eq!(second.as_str(), "prod-1700000000123-2");

        store.add(product(second.as_str(), "Second"));
        assert_eq!(store.next_product_id(now).as_str(), "prod-1700000000123-3");
    }
}
