//! Catalog generation.
//!
//! The storefront has no product database. At startup a generative model is
//! asked for a mock catalog conforming to [`schema::catalog_schema`], and the
//! response text is parsed into [`Product`]s. Any failure is fatal for the
//! session and is reported to shoppers with a single fixed message.

pub mod schema;

use std::collections::HashSet;
use std::future::Future;

use gemini_store_core::{Product, ProductId};
use thiserror::Error;
use tracing::instrument;

use crate::gemini::{GeminiClient, GeminiError};

/// Message shown to the shopper whenever the catalog cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str =
    "Failed to fetch product data. Please check your API key and try again.";

/// Errors produced while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The generation request failed.
    #[error("generation failed: {0}")]
    Generation(#[from] GeminiError),

    /// The response text was not valid catalog JSON.
    #[error("invalid catalog JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The response had no `products` array.
    #[error("response has no products array")]
    MissingProducts,

    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// A product is priced below zero.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
}

impl CatalogError {
    /// The shopper-facing message. Identical for every cause.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        LOAD_FAILED_MESSAGE
    }
}

/// Something that can turn a prompt and a response schema into JSON text.
pub trait TextGenerator: Send + Sync {
    /// Generate text conforming to `schema`.
    fn generate_json(
        &self,
        prompt: &str,
        schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, GeminiError>> + Send;
}

impl TextGenerator for GeminiClient {
    fn generate_json(
        &self,
        prompt: &str,
        schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, GeminiError>> + Send {
        Self::generate_json(self, prompt, schema)
    }
}

/// Loads the catalog through a [`TextGenerator`].
#[derive(Debug, Clone)]
pub struct CatalogLoader<G> {
    generator: G,
}

impl<G: TextGenerator> CatalogLoader<G> {
    /// Create a loader around a generator.
    #[must_use]
    pub const fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Request and parse the catalog.
    ///
    /// Issues exactly one generation request. Does not retry.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if generation fails or the response does not
    /// match the catalog schema.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        let prompt = schema::catalog_prompt();
        let text = self
            .generator
            .generate_json(&prompt, schema::catalog_schema())
            .await?;

        let products = parse_catalog(&text)?;
        tracing::info!(count = products.len(), "Catalog generated");
        Ok(products)
    }
}

/// Parse `{"products": [...]}` response text.
///
/// An empty array is a valid, empty catalog. Every element must carry every
/// product field, ids must be unique and prices non-negative; one bad element
/// fails the whole catalog.
///
/// # Errors
///
/// Returns `CatalogError::Parse` for malformed JSON or malformed products,
/// `CatalogError::MissingProducts` when there is no `products` array, and
/// `CatalogError::DuplicateId` / `CatalogError::NegativePrice` for products
/// the store cannot hold.
pub fn parse_catalog(text: &str) -> Result<Vec<Product>, CatalogError> {
    let mut value: serde_json::Value =
        serde_json::from_str(text.trim()).map_err(CatalogError::Parse)?;

    let products = match value.get_mut("products") {
        Some(products @ serde_json::Value::Array(_)) => products.take(),
        _ => return Err(CatalogError::MissingProducts),
    };

    let products: Vec<Product> = serde_json::from_value(products).map_err(CatalogError::Parse)?;
    validate_products(&products)?;
    Ok(products)
}

fn validate_products(products: &[Product]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if product.price.is_negative() {
            return Err(CatalogError::NegativePrice(product.id.clone()));
        }
        if !seen.insert(&product.id) {
            return Err(CatalogError::DuplicateId(product.id.clone()));
        }
    }
    Ok(())
}
