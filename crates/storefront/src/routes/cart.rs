//! Cart route handlers.
//!
//! Every mutation answers with the whole cart so the client can redraw the
//! cart panel and badge from one response.

use axum::{Json, extract::State};
use gemini_store_core::{CartItem, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::shop::{EMPTY_CART_MESSAGE, ORDER_PLACED_MESSAGE, Shop};
use crate::state::AppState;
use crate::store::CheckoutOutcome;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub image_url: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
    pub is_open: bool,
}

/// Cart badge.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Result of a checkout attempt.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub outcome: CheckoutResult,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutResult {
    Placed,
    Empty,
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            category: item.product.category.clone(),
            image_url: item.product.image_url.clone(),
            quantity: item.quantity,
            price: item.product.price.display(),
            line_price: item.line_total().display(),
        }
    }
}

impl From<&Shop> for CartView {
    fn from(shop: &Shop) -> Self {
        Self {
            items: shop.cart().items().iter().map(CartItemView::from).collect(),
            subtotal: shop.cart_subtotal().display(),
            item_count: shop.cart_item_count(),
            is_open: shop.is_cart_open(),
        }
    }
}

impl From<CheckoutOutcome> for CheckoutResponse {
    fn from(outcome: CheckoutOutcome) -> Self {
        match outcome {
            CheckoutOutcome::Placed => Self {
                outcome: CheckoutResult::Placed,
                message: ORDER_PLACED_MESSAGE,
            },
            CheckoutOutcome::EmptyCart => Self {
                outcome: CheckoutResult::Empty,
                message: EMPTY_CART_MESSAGE,
            },
        }
    }
}

// =============================================================================
// Request Bodies
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<CartView>> {
    let cart = state.with_shop(|shop| CartView::from(&*shop)).await?;
    Ok(Json(cart))
}

/// Cart badge count.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<Json<CartCount>> {
    let count = state.with_shop(|shop| shop.cart_item_count()).await?;
    Ok(Json(CartCount { count }))
}

/// Add one unit of a product.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let cart = state
        .try_with_shop(|shop| {
            shop.add_to_cart(&request.product_id)?;
            Ok::<_, crate::shop::ShopError>(CartView::from(&*shop))
        })
        .await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", request.product_id.as_str())]),
    );
    Ok(Json(cart))
}

/// Set a line's quantity; zero or less removes it.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let cart = state
        .with_shop(|shop| {
            shop.update_cart_quantity(&request.product_id, request.quantity);
            CartView::from(&*shop)
        })
        .await?;
    Ok(Json(cart))
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let cart = state
        .with_shop(|shop| {
            shop.remove_from_cart(&request.product_id);
            CartView::from(&*shop)
        })
        .await?;
    Ok(Json(cart))
}

/// Open the cart panel.
#[instrument(skip(state))]
pub async fn open(State(state): State<AppState>) -> Result<Json<CartView>> {
    let cart = state
        .with_shop(|shop| {
            shop.open_cart();
            CartView::from(&*shop)
        })
        .await?;
    Ok(Json(cart))
}

/// Close the cart panel.
#[instrument(skip(state))]
pub async fn close(State(state): State<AppState>) -> Result<Json<CartView>> {
    let cart = state
        .with_shop(|shop| {
            shop.close_cart();
            CartView::from(&*shop)
        })
        .await?;
    Ok(Json(cart))
}

/// Place the order.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Json<CheckoutResponse>> {
    let outcome = state.with_shop(Shop::checkout).await?;
    if outcome == CheckoutOutcome::Placed {
        add_breadcrumb("cart", "Order placed", None);
    }
    Ok(Json(CheckoutResponse::from(outcome)))
}
