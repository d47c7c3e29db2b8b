//! Catalog product.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product in the catalog.
///
/// The serialized shape matches the structured output requested from the
/// generative model: every field is required and `imageUrl` is camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique within the catalog.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Free-text label such as "Electronics" or "Books".
    pub category: String,
    pub image_url: String,
}

impl Product {
    /// Whether the (already lower-cased) search term matches this product's
    /// name or category, case-insensitively.
    #[must_use]
    pub fn matches_search(&self, lowered_term: &str) -> bool {
        lowered_term.is_empty()
            || self.name.to_lowercase().contains(lowered_term)
            || self.category.to_lowercase().contains(lowered_term)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn notebook() -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Notebook".to_string(),
            description: "Lined pages.".to_string(),
            price: Price::usd(Decimal::new(499, 2)),
            category: "Electronics".to_string(),
            image_url: "https://picsum.photos/400/400".to_string(),
        }
    }

    #[test]
    fn test_product_wire_shape_is_camel_case() {
        let json = serde_json::to_value(notebook()).expect("serialize");
        assert_eq!(json["imageUrl"], "https://picsum.photos/400/400");
        assert_eq!(json["price"], serde_json::json!(4.99));
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_product_requires_every_field() {
        let missing_image = r#"{"id":"x","name":"n","description":"d","price":1,"category":"c"}"#;
        assert!(serde_json::from_str::<Product>(missing_image).is_err());
    }

    #[test]
    fn test_matches_search_on_name_or_category() {
        let product = notebook();
        assert!(product.matches_search("book"));
        assert!(product.matches_search("electr"));
        assert!(product.matches_search(""));
        assert!(!product.matches_search("diary"));
    }
}
