//! Unified error handling for route handlers.
//!
//! Every `AppError` is a client or availability error with a shopper-safe
//! message, sent as `{"error": "..."}`. The one server-side failure, a
//! catalog load error, is reported to Sentry when it happens
//! (`AppState::set_failed`), not per request. All route handlers should
//! return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gemini_store_core::UserRoleError;
use serde::Serialize;
use thiserror::Error;

use crate::shop::ShopError;
use crate::store::FormError;

/// Message returned while the background catalog load is still running.
pub const CATALOG_LOADING_MESSAGE: &str = "Catalog is still loading";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The catalog has not finished loading.
    #[error("Catalog is still loading")]
    CatalogLoading,

    /// The catalog failed to load; the message is shopper-facing.
    #[error("{0}")]
    CatalogFailed(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::CatalogLoading | Self::CatalogFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        tracing::debug!(error = %self, status = status.as_u16(), "Request error");

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

impl From<ShopError> for AppError {
    fn from(err: ShopError) -> Self {
        match err {
            ShopError::ProductNotFound(id) => Self::NotFound(format!("product {id}")),
            ShopError::FormClosed => Self::NotFound("no product form is open".to_string()),
        }
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<UserRoleError> for AppError {
    fn from(err: UserRoleError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "p-1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gemini_store_core::ProductId;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");

        assert_eq!(AppError::CatalogLoading.to_string(), "Catalog is still loading");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::CatalogLoading),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            get_status(AppError::CatalogFailed("boom".to_string())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_error_body_is_json() {
        let response = AppError::CatalogFailed("Failed to fetch".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Failed to fetch" }));
    }

    #[test]
    fn test_shop_errors_map_to_not_found() {
        let err = AppError::from(ShopError::ProductNotFound(ProductId::new("p-9")));
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "product p-9"));

        let err = AppError::from(ShopError::FormClosed);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_form_error_is_bad_request() {
        let err = AppError::from(FormError::UnknownField("id".to_string()));
        assert_eq!(err.to_string(), "Bad request: unknown form field: id");
    }
}
