//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Liveness
//! GET    /health/ready              - 200 once the catalog is loaded
//! GET    /api/status                - Catalog load status
//!
//! # Catalog
//! GET    /api/catalog               - Current page
//! POST   /api/catalog/search        - Set search term (resets to page 1)
//! POST   /api/catalog/page          - Jump to page (clamped)
//! POST   /api/catalog/next          - Next page
//! POST   /api/catalog/previous      - Previous page
//!
//! # Session
//! GET    /api/role                  - Current role
//! PUT    /api/role                  - Switch role
//! GET    /api/notice                - Current notice or null
//!
//! # Cart
//! GET    /api/cart                  - Cart panel
//! GET    /api/cart/count            - Badge count
//! POST   /api/cart/add              - Add one unit
//! POST   /api/cart/update           - Set quantity (<= 0 removes)
//! POST   /api/cart/remove           - Remove line
//! POST   /api/cart/open             - Open panel
//! POST   /api/cart/close            - Close panel
//! POST   /api/checkout              - Place order
//!
//! # Products (admin controls)
//! GET    /api/products/form         - Open form (404 when closed)
//! POST   /api/products/form         - Open create/edit form
//! DELETE /api/products/form         - Close form
//! POST   /api/products/form/field   - Update one field
//! POST   /api/products/form/submit  - Save
//! DELETE /api/products/{id}         - Delete product
//! ```
//!
//! While the catalog is loading every shop route answers 503; after a failed
//! load they answer 503 with the load error.

pub mod cart;
pub mod catalog;
pub mod health;
pub mod products;
pub mod session;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::show))
        .route("/search", post(catalog::search))
        .route("/page", post(catalog::go_to_page))
        .route("/next", post(catalog::next))
        .route("/previous", post(catalog::previous))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
}

/// Create the product administration routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/form",
            get(products::show_form)
                .post(products::open_form)
                .delete(products::close_form),
        )
        .route("/form/field", post(products::update_field))
        .route("/form/submit", post(products::submit_form))
        .route("/{id}", delete(products::delete))
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(session::status))
        .route("/role", get(session::role).put(session::set_role))
        .route("/notice", get(session::notice))
        .nest("/catalog", catalog_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .nest("/products", product_routes())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
}
