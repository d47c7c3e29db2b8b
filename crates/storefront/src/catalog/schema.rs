//! Prompt and response schema for catalog generation.

use serde_json::{Value, json};

/// Number of products requested from the model.
pub const PRODUCT_COUNT: usize = 20;

/// Example categories the model is steered toward.
pub const CATEGORIES: &[&str] = &["electronics", "books", "home goods", "apparel"];

/// The generation prompt.
#[must_use]
pub fn catalog_prompt() -> String {
    format!(
        "Generate a list of {PRODUCT_COUNT} diverse and interesting products for a mock \
         e-commerce store. Include products from categories like {}. Ensure each product \
         has a unique ID.",
        category_list()
    )
}

/// "a, b, c, and d"
fn category_list() -> String {
    match CATEGORIES.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, and {last}", rest.join(", ")),
        Some((last, _)) => (*last).to_string(),
        None => String::new(),
    }
}

/// Schema of a single product record.
#[must_use]
pub fn product_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "id": {
                "type": "STRING",
                "description": "A unique identifier for the product (e.g., UUID)."
            },
            "name": {
                "type": "STRING",
                "description": "The creative and appealing name of the product."
            },
            "description": {
                "type": "STRING",
                "description": "A brief but compelling description of the product, 1-2 sentences long."
            },
            "price": {
                "type": "NUMBER",
                "description": "The price of the product in USD, between 10 and 2000."
            },
            "category": {
                "type": "STRING",
                "description": "The category of the product (e.g., Electronics, Books, Home Goods, Apparel)."
            },
            "imageUrl": {
                "type": "STRING",
                "description": "A placeholder image URL from https://picsum.photos/400/400."
            }
        },
        "required": ["id", "name", "description", "price", "category", "imageUrl"]
    })
}

/// Schema of the whole response: `{ "products": [Product] }`.
#[must_use]
pub fn catalog_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "products": {
                "type": "ARRAY",
                "items": product_schema()
            }
        },
        "required": ["products"]
    })
}
