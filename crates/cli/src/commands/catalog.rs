//! Catalog preview commands.
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY` (or `API_KEY`) - Gemini API key
//! - `GEMINI_MODEL` - Model name (default: gemini-2.5-flash)
//! - `GEMINI_API_BASE` - API base URL

use std::collections::BTreeMap;
use std::fmt::Write as _;

use gemini_store_core::Product;
use gemini_store_storefront::catalog::{CatalogError, CatalogLoader, schema};
use gemini_store_storefront::config::{ConfigError, StoreConfig};
use gemini_store_storefront::gemini::{GeminiClient, GeminiError};
use thiserror::Error;

/// Errors that can occur during catalog commands.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gemini client error: {0}")]
    Client(#[from] GeminiError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Generate a catalog exactly as the server would and print it.
///
/// # Errors
///
/// Returns an error if no API key is configured or generation fails.
pub async fn generate(json: bool) -> Result<(), CatalogCommandError> {
    let config = StoreConfig::from_env()?;
    config.gemini.require_api_key()?;

    let client = GeminiClient::new(&config.gemini)?;
    tracing::info!(model = client.model(), "Requesting catalog...");

    let products = CatalogLoader::new(client).load().await?;

    let output = if json {
        serde_json::to_string_pretty(&products)?
    } else {
        format_table(&products)
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}

/// Print the prompt and the structured output schema.
///
/// # Errors
///
/// Returns an error if the schema cannot be serialized.
pub fn schema() -> Result<(), CatalogCommandError> {
    let schema = serde_json::to_string_pretty(&schema::catalog_schema())?;

    #[allow(clippy::print_stdout)]
    {
        println!("Prompt:\n  {}\n", schema::catalog_prompt());
        println!("Response schema:\n{schema}");
    }
    Ok(())
}

/// Render products as a fixed-width table followed by per-category counts.
fn format_table(products: &[Product]) -> String {
    let name_width = products
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let category_width = products
        .iter()
        .map(|p| p.category.chars().count())
        .max()
        .unwrap_or(0)
        .max("CATEGORY".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  {:<category_width$}  {:>10}",
        "NAME", "CATEGORY", "PRICE"
    );
    for product in products {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<category_width$}  {:>10}",
            product.name,
            product.category,
            product.price.display()
        );
    }

    let mut by_category: BTreeMap<&str, usize> = BTreeMap::new();
    for product in products {
        *by_category.entry(product.category.as_str()).or_default() += 1;
    }
    let _ = writeln!(out, "\n{} products", products.len());
    for (category, count) in by_category {
        let _ = writeln!(out, "  {category}: {count}");
    }
    out
}

#[cfg(test)]
mod tests {
    use gemini_store_core::{Price, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn product(name: &str, category: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(name),
            name: name.to_string(),
            description: String::new(),
            price: Price::usd(Decimal::new(cents, 2)),
            category: category.to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_format_table() {
        let table = format_table(&[
            product("Trail Jacket", "Apparel", 12900),
            product("Field Notes", "Books", 1250),
            product("Rain Hat", "Apparel", 3000),
        ]);

        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].starts_with("Trail Jacket  Apparel"));
        assert!(lines[1].ends_with("$129.00"));
        assert!(table.contains("3 products"));
        assert!(table.contains("  Apparel: 2"));
        assert!(table.contains("  Books: 1"));
    }

    #[test]
    fn test_format_empty_table() {
        let table = format_table(&[]);
        assert!(table.contains("0 products"));
    }
}
