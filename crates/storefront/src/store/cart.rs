//! In-memory shopping cart.

use gemini_store_core::{CartItem, Price, Product, ProductId};

/// What happened when the shopper tried to check out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The cart had items and has been cleared.
    Placed,
    /// Nothing to check out; the cart is unchanged.
    EmptyCart,
}

/// Cart lines in the order they were first added.
///
/// Each product appears at most once and every quantity is at least 1.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<CartItem>,
}

impl CartStore {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// A product already in the cart keeps its original snapshot; only the
    /// quantity grows.
    pub fn add_or_increment(&mut self, product: &Product) {
        if let Some(item) = self.find_mut(&product.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem::new(product.clone()));
        }
    }

    /// Set a line to exactly `quantity`; zero or less removes it.
    ///
    /// Unknown ids are ignored.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.find_mut(id) {
            item.quantity = quantity;
        }
    }

    /// Remove a line regardless of quantity.
    pub fn remove(&mut self, id: &ProductId) {
        self.items.retain(|item| item.product_id() != id);
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of every line total.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Place the order: clears a non-empty cart.
    pub fn checkout(&mut self) -> CheckoutOutcome {
        if self.items.is_empty() {
            return CheckoutOutcome::EmptyCart;
        }
        self.items.clear();
        CheckoutOutcome::Placed
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_mut(&mut self, id: &ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.product_id() == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::usd(Decimal::new(cents, 2)),
            category: "Apparel".to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_add_or_increment() {
        let mut cart = CartStore::new();
        let a = product("a", 1000);

        cart.add_or_increment(&a);
        cart.add_or_increment(&a);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&a.id).unwrap().quantity, 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_snapshot_is_not_refreshed() {
        let mut cart = CartStore::new();
        let mut a = product("a", 1000);
        cart.add_or_increment(&a);

        a.price = Price::usd(Decimal::new(9900, 2));
        cart.add_or_increment(&a);

        assert_eq!(cart.subtotal(), Price::usd(Decimal::new(2000, 2)));
    }

    #[test]
    fn test_set_quantity_is_absolute() {
        let mut cart = CartStore::new();
        let a = product("a", 500);
        cart.add_or_increment(&a);
        cart.add_or_increment(&a);

        cart.set_quantity(&a.id, 5);
        assert_eq!(cart.get(&a.id).unwrap().quantity, 5);
    }

    #[test]
    fn test_set_quantity_non_positive_removes() {
        let mut cart = CartStore::new();
        let a = product("a", 500);
        let b = product("b", 500);
        cart.add_or_increment(&a);
        cart.add_or_increment(&b);

        cart.set_quantity(&a.id, 0);
        cart.set_quantity(&b.id, -3);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_id_is_ignored() {
        let mut cart = CartStore::new();
        cart.set_quantity(&ProductId::new("ghost"), 4);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_and_count() {
        let mut cart = CartStore::new();
        let a = product("a", 1999);
        let b = product("b", 250);
        cart.add_or_increment(&a);
        cart.add_or_increment(&b);
        cart.set_quantity(&b.id, 3);

        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.subtotal().display(), "$27.49");

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id().as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_subtotal_saturates_on_huge_lines() {
        let mut cart = CartStore::new();
        let mut expensive = product("big", 0);
        expensive.price = Price::from_f64_lossy(1e20);

        cart.add_or_increment(&expensive);
        cart.add_or_increment(&product("small", 500));
        cart.set_quantity(&expensive.id, i64::MAX);

        assert_eq!(cart.get(&expensive.id).unwrap().quantity, u32::MAX);
        assert_eq!(cart.subtotal().amount, Decimal::MAX);
        assert_eq!(cart.checkout(), CheckoutOutcome::Placed);
    }

    #[test]
    fn test_checkout() {
        let mut cart = CartStore::new();
        assert_eq!(cart.checkout(), CheckoutOutcome::EmptyCart);

        cart.add_or_increment(&product("a", 100));
        assert_eq!(cart.checkout(), CheckoutOutcome::Placed);
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Price::ZERO);
    }
}
