//! Application state shared across handlers.
//!
//! The shop only exists once the catalog has loaded. Until then (or forever,
//! if the load failed) every shop action answers with the load status instead.

use std::sync::Arc;

use gemini_store_core::Product;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::catalog::{CatalogError, CatalogLoader, TextGenerator};
use crate::config::StoreConfig;
use crate::error::AppError;
use crate::notice::Notifier;
use crate::shop::Shop;

/// Where the catalog load stands.
#[derive(Debug)]
pub enum CatalogStatus {
    /// The background load has not finished.
    Loading,
    /// The catalog is loaded and the shop is open.
    Ready(Box<Shop>),
    /// The load failed; the session stays in this state.
    Failed {
        /// Shopper-facing message.
        message: String,
    },
}

/// Coarse load state for status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Loading,
    Ready,
    Failed,
}

/// Snapshot of [`CatalogStatus`] without the shop itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub state: LoadState,
    /// Error message when failed.
    pub message: Option<String>,
    /// Products in the catalog when ready.
    pub product_count: Option<usize>,
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StoreConfig,
    catalog: Mutex<CatalogStatus>,
    notifier: Notifier,
}

impl AppState {
    /// Create state in the `Loading` status.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        let notifier = Notifier::new(config.notice_duration);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Mutex::new(CatalogStatus::Loading),
                notifier,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// The session's notice slot.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    /// Open the shop over `products`.
    pub async fn set_ready(&self, products: Vec<Product>) {
        let shop = Shop::new(products, self.inner.notifier.clone());
        *self.inner.catalog.lock().await = CatalogStatus::Ready(Box::new(shop));
    }

    /// Record a failed load. Logged and reported once, here.
    pub async fn set_failed(&self, err: &CatalogError) {
        let event_id = sentry::capture_error(err);
        error!(error = %err, sentry_event_id = %event_id, "Failed to load catalog");
        *self.inner.catalog.lock().await = CatalogStatus::Failed {
            message: err.user_message().to_string(),
        };
    }

    /// Current load status.
    pub async fn status(&self) -> StatusSnapshot {
        match &*self.inner.catalog.lock().await {
            CatalogStatus::Loading => StatusSnapshot {
                state: LoadState::Loading,
                message: None,
                product_count: None,
            },
            CatalogStatus::Ready(shop) => StatusSnapshot {
                state: LoadState::Ready,
                message: None,
                product_count: Some(shop.products().len()),
            },
            CatalogStatus::Failed { message } => StatusSnapshot {
                state: LoadState::Failed,
                message: Some(message.clone()),
                product_count: None,
            },
        }
    }

    /// Run an action against the open shop.
    ///
    /// # Errors
    ///
    /// Returns `AppError::CatalogLoading` or `AppError::CatalogFailed` when
    /// the shop is not open.
    pub async fn with_shop<T>(&self, f: impl FnOnce(&mut Shop) -> T) -> Result<T, AppError> {
        match &mut *self.inner.catalog.lock().await {
            CatalogStatus::Ready(shop) => Ok(f(shop.as_mut())),
            CatalogStatus::Loading => Err(AppError::CatalogLoading),
            CatalogStatus::Failed { message } => Err(AppError::CatalogFailed(message.clone())),
        }
    }

    /// Like [`AppState::with_shop`] for fallible actions.
    ///
    /// # Errors
    ///
    /// Returns the shop-closed errors of `with_shop`, or the action's own
    /// error converted to `AppError`.
    pub async fn try_with_shop<T, E>(
        &self,
        f: impl FnOnce(&mut Shop) -> Result<T, E>,
    ) -> Result<T, AppError>
    where
        E: Into<AppError>,
    {
        self.with_shop(f).await?.map_err(Into::into)
    }

    /// Spawn a background task that loads the catalog and opens the shop.
    ///
    /// Until it finishes, shop actions answer `CatalogLoading`.
    pub fn load_catalog_async<G>(&self, loader: CatalogLoader<G>) -> JoinHandle<()>
    where
        G: TextGenerator + 'static,
    {
        info!("Spawning background catalog load task");
        let state = self.clone();
        tokio::spawn(async move {
            match loader.load().await {
                Ok(products) => {
                    let count = products.len();
                    state.set_ready(products).await;
                    info!(count, "Catalog is ready and serving requests");
                }
                Err(e) => state.set_failed(&e).await,
            }
        })
    }
}
