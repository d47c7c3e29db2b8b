//! The shop session: every piece of mutable demo state plus the actions that
//! change it.
//!
//! Handlers never touch the stores directly; each user action is one method
//! here, which keeps notice messages and side effects (closing the cart
//! panel, resetting the page) in one place.

use chrono::Utc;
use gemini_store_core::{Price, Product, ProductId, UserRole};
use thiserror::Error;
use tracing::instrument;

use crate::notice::{NoticeKind, Notifier};
use crate::store::{
    CartStore, CatalogPage, CheckoutOutcome, FormField, ProductForm, ProductStore, ViewState,
};

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty!";
pub const ORDER_PLACED_MESSAGE: &str = "Order placed successfully! Thank you for shopping.";
pub const PRODUCT_ADDED_MESSAGE: &str = "Product added successfully!";
pub const PRODUCT_UPDATED_MESSAGE: &str = "Product updated successfully!";
pub const PRODUCT_DELETED_MESSAGE: &str = "Product deleted.";

/// Errors from shop actions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShopError {
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("no product form is open")]
    FormClosed,
}

/// One shopper's session.
#[derive(Debug)]
pub struct Shop {
    products: ProductStore,
    cart: CartStore,
    view: ViewState,
    role: UserRole,
    cart_open: bool,
    form: Option<ProductForm>,
    notifier: Notifier,
}

impl Shop {
    /// Start a session over a freshly loaded catalog.
    #[must_use]
    pub fn new(products: Vec<Product>, notifier: Notifier) -> Self {
        Self {
            products: ProductStore::new(products),
            cart: CartStore::new(),
            view: ViewState::default(),
            role: UserRole::default(),
            cart_open: false,
            form: None,
            notifier,
        }
    }

    // -------------------------------------------------------------------------
    // Role
    // -------------------------------------------------------------------------

    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    pub fn set_role(&mut self, role: UserRole) {
        tracing::info!(%role, "Role changed");
        self.role = role;
    }

    // -------------------------------------------------------------------------
    // Catalog view
    // -------------------------------------------------------------------------

    /// Search by name or category; resets to page 1.
    pub fn search(&mut self, term: impl Into<String>) {
        self.view.set_search(term);
    }

    pub fn go_to_page(&mut self, page: i64) {
        let total = self.view.total_pages(self.products.all());
        self.view.go_to_page(page, total);
    }

    pub fn next_page(&mut self) {
        let total = self.view.total_pages(self.products.all());
        self.view.next_page(total);
    }

    pub fn previous_page(&mut self) {
        self.view.previous_page();
    }

    /// The page the shopper is looking at.
    #[must_use]
    pub fn catalog_page(&self) -> CatalogPage {
        self.view.page(self.products.all(), self.role.is_admin())
    }

    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub const fn products(&self) -> &ProductStore {
        &self.products
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Add one unit of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::ProductNotFound` if no product has this id.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub fn add_to_cart(&mut self, id: &ProductId) -> Result<(), ShopError> {
        let product = self
            .products
            .get(id)
            .ok_or_else(|| ShopError::ProductNotFound(id.clone()))?;

        self.cart.add_or_increment(product);
        self.notifier
            .show(format!("{} added to cart!", product.name), NoticeKind::Success);
        Ok(())
    }

    /// Set a cart line's quantity; zero or less removes it.
    pub fn update_cart_quantity(&mut self, id: &ProductId, quantity: i64) {
        self.cart.set_quantity(id, quantity);
    }

    pub fn remove_from_cart(&mut self, id: &ProductId) {
        self.cart.remove(id);
    }

    pub const fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub const fn close_cart(&mut self) {
        self.cart_open = false;
    }

    #[must_use]
    pub const fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    /// Place the order.
    ///
    /// An empty cart only gets a notice. Otherwise the cart is cleared and
    /// the cart panel closes.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> CheckoutOutcome {
        let items = self.cart.item_count();
        let subtotal = self.cart.subtotal();
        let outcome = self.cart.checkout();

        match outcome {
            CheckoutOutcome::EmptyCart => {
                self.notifier.show(EMPTY_CART_MESSAGE, NoticeKind::Info);
            }
            CheckoutOutcome::Placed => {
                tracing::info!(items, subtotal = %subtotal, "Order placed");
                self.cart_open = false;
                self.notifier.show(ORDER_PLACED_MESSAGE, NoticeKind::Success);
            }
        }
        outcome
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn cart_subtotal(&self) -> Price {
        self.cart.subtotal()
    }

    // -------------------------------------------------------------------------
    // Product administration
    // -------------------------------------------------------------------------

    /// Open the product form: empty for `None`, pre-filled for `Some(id)`.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::ProductNotFound` if the product to edit is gone.
    pub fn open_product_form(&mut self, id: Option<&ProductId>) -> Result<&ProductForm, ShopError> {
        let form = match id {
            None => ProductForm::create_at(Utc::now()),
            Some(id) => {
                let product = self
                    .products
                    .get(id)
                    .ok_or_else(|| ShopError::ProductNotFound(id.clone()))?;
                ProductForm::edit(product)
            }
        };
        Ok(self.form.insert(form))
    }

    /// Set one field of the open form.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::FormClosed` if no form is open.
    pub fn update_form_field(
        &mut self,
        field: FormField,
        value: &str,
    ) -> Result<&ProductForm, ShopError> {
        let form = self.form.as_mut().ok_or(ShopError::FormClosed)?;
        form.set_field(field, value);
        Ok(form)
    }

    /// Save the open form and close it.
    ///
    /// New products get a fresh `prod-<millis>` id and go to the front of
    /// the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::FormClosed` if no form is open.
    #[instrument(skip(self))]
    pub fn submit_product_form(&mut self) -> Result<Product, ShopError> {
        let form = self.form.take().ok_or(ShopError::FormClosed)?;
        let mut product = form.submit();

        if product.id.is_empty() {
            product.id = self.products.next_product_id(Utc::now());
            tracing::info!(product_id = %product.id, "Product created");
            self.products.add(product.clone());
            self.notifier.show(PRODUCT_ADDED_MESSAGE, NoticeKind::Success);
        } else {
            if !self.products.update(product.clone()) {
                tracing::warn!(
                    product_id = %product.id,
                    "Edited product no longer exists, nothing was updated"
                );
            }
            self.notifier
                .show(PRODUCT_UPDATED_MESSAGE, NoticeKind::Success);
        }
        Ok(product)
    }

    pub fn close_product_form(&mut self) {
        self.form = None;
    }

    #[must_use]
    pub const fn product_form(&self) -> Option<&ProductForm> {
        self.form.as_ref()
    }

    /// Remove a product from the catalog.
    ///
    /// Cart lines already holding it are left alone.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub fn delete_product(&mut self, id: &ProductId) {
        self.products.remove(id);
        self.notifier.show(PRODUCT_DELETED_MESSAGE, NoticeKind::Info);
    }

    #[must_use]
    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}
