//! Integration tests for Gemini Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gemini-store-integration-tests
//! ```
//!
//! No network access or API key is needed: the catalog comes from a
//! [`StubGenerator`] and requests are driven through the router in-process
//! with `tower::ServiceExt::oneshot`.
//!
//! # Test Categories
//!
//! - `catalog_api` - load status, search, pagination
//! - `cart_api` - cart and checkout flow
//! - `products_api` - product form and deletion

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Mutex;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use gemini_store_core::{Price, Product, ProductId};
use gemini_store_storefront::{
    app,
    catalog::{CatalogLoader, TextGenerator},
    config::StoreConfig,
    gemini::GeminiError,
    state::AppState,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

/// A text generator that replays one canned answer.
pub struct StubGenerator {
    response: Mutex<Option<Result<String, GeminiError>>>,
}

impl StubGenerator {
    /// Answer with this response text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            response: Mutex::new(Some(Ok(text.into()))),
        }
    }

    /// Answer with `{"products": [...]}` for these products.
    ///
    /// # Panics
    ///
    /// Panics if the products cannot be serialized.
    #[must_use]
    pub fn catalog(products: &[Product]) -> Self {
        let text = serde_json::json!({ "products": products }).to_string();
        Self::text(text)
    }

    /// Fail the way a rejected API key does.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            response: Mutex::new(Some(Err(GeminiError::Unauthorized(
                "API key rejected".to_string(),
            )))),
        }
    }
}

impl TextGenerator for StubGenerator {
    async fn generate_json(
        &self,
        _prompt: &str,
        _schema: Value,
    ) -> Result<String, GeminiError> {
        self.response
            .lock()
            .map_err(|_| GeminiError::EmptyResponse)?
            .take()
            .unwrap_or(Err(GeminiError::EmptyResponse))
    }
}

/// `n` products alternating between "Electronics" and "Books", priced
/// `$10.00`, `$11.00`, ...
#[must_use]
pub fn sample_products(n: usize) -> Vec<Product> {
    (0..n)
        .map(|i| {
            let dollars = i64::try_from(10 + i).unwrap_or(i64::MAX);
            Product {
                id: ProductId::new(format!("gen-{i}")),
                name: format!("Sample {i}"),
                description: format!("Sample product number {i}."),
                price: Price::usd(Decimal::new(dollars, 0)),
                category: if i % 2 == 0 { "Electronics" } else { "Books" }.to_string(),
                image_url: format!("https://picsum.photos/400/400?random={i}"),
            }
        })
        .collect()
}

/// A storefront under test.
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    fn with_state(state: AppState) -> Self {
        let router = app(state.clone());
        Self { state, router }
    }

    fn new_state() -> AppState {
        let config = StoreConfig::from_lookup(|_| None).unwrap_or_else(|e| {
            panic!("default config must load: {e}");
        });
        AppState::new(config)
    }

    /// A storefront whose catalog load has not finished.
    #[must_use]
    pub fn loading() -> Self {
        Self::with_state(Self::new_state())
    }

    /// A storefront that loaded `generator`'s answer (success or failure).
    ///
    /// # Panics
    ///
    /// Panics if the load task panics.
    pub async fn loaded_with(generator: StubGenerator) -> Self {
        let state = Self::new_state();
        let handle = state.load_catalog_async(CatalogLoader::new(generator));
        if let Err(e) = handle.await {
            panic!("catalog load task failed: {e}");
        }
        Self::with_state(state)
    }

    /// A storefront open for business with `products`.
    pub async fn ready(products: &[Product]) -> Self {
        Self::loaded_with(StubGenerator::catalog(products)).await
    }

    /// Send a request and return status and JSON body (`Null` when empty).
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body is not JSON.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap_or_else(|e| panic!("invalid request: {e}"));

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|e| match e {});

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_else(|e| panic!("failed to read body: {e}"));

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::POST, uri, None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}
