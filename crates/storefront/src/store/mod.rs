//! In-memory shop state: products, cart, catalog view, product form.

pub mod cart;
pub mod form;
pub mod products;
pub mod view;

pub use cart::{CartStore, CheckoutOutcome};
pub use form::{FormError, FormField, FormMode, ProductDraft, ProductForm};
pub use products::ProductStore;
pub use view::{CatalogPage, PAGE_SIZE, ViewState};
