//! Cart line item.

use serde::{Deserialize, Serialize};

use super::{Price, Product, ProductId};

/// A product snapshot plus a quantity.
///
/// The snapshot is taken when the product is first added; editing the
/// catalog product afterwards does not reach into existing cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl CartItem {
    /// Start a new line with quantity 1.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The product this line refers to.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Snapshotted unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_line_total() {
        let mut item = CartItem::new(Product {
            id: ProductId::new("lamp"),
            name: "Desk Lamp".to_string(),
            description: String::new(),
            price: Price::usd(Decimal::new(2550, 2)),
            category: "Home Goods".to_string(),
            image_url: String::new(),
        });
        assert_eq!(item.quantity, 1);
        item.quantity = 4;
        assert_eq!(item.line_total().amount, Decimal::new(10200, 2));
        assert_eq!(item.product_id().as_str(), "lamp");
    }
}
