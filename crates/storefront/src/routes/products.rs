//! Product administration: the create/edit form and deletion.
//!
//! These routes back the admin controls. The role is a display toggle only,
//! so nothing here checks it.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use gemini_store_core::{Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::shop::ShopError;
use crate::state::AppState;
use crate::store::{FormField, FormMode, ProductDraft, ProductForm};

/// Open form display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    /// "create" or "edit".
    pub mode: &'static str,
    /// The product being edited.
    pub product_id: Option<ProductId>,
    pub draft: ProductDraft,
}

impl From<&ProductForm> for FormView {
    fn from(form: &ProductForm) -> Self {
        let (mode, product_id) = match form.mode() {
            FormMode::Create => ("create", None),
            FormMode::Edit(id) => ("edit", Some(id.clone())),
        };
        Self {
            mode,
            product_id,
            draft: form.draft().clone(),
        }
    }
}

/// Open the form; with a product id it edits that product.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenFormRequest {
    #[serde(default)]
    pub product_id: Option<ProductId>,
}

/// One field change, named as the form input is.
#[derive(Debug, Deserialize)]
pub struct FieldRequest {
    pub field: String,
    pub value: String,
}

/// The open form, 404 if none.
#[instrument(skip(state))]
pub async fn show_form(State(state): State<AppState>) -> Result<Json<FormView>> {
    let form = state
        .try_with_shop(|shop| {
            shop.product_form()
                .map(FormView::from)
                .ok_or(ShopError::FormClosed)
        })
        .await?;
    Ok(Json(form))
}

/// Open the create form, or the edit form for `productId`.
#[instrument(skip(state))]
pub async fn open_form(
    State(state): State<AppState>,
    Json(request): Json<OpenFormRequest>,
) -> Result<Json<FormView>> {
    let form = state
        .try_with_shop(|shop| {
            shop.open_product_form(request.product_id.as_ref())
                .map(FormView::from)
        })
        .await?;
    Ok(Json(form))
}

/// Update one field of the open form.
#[instrument(skip(state))]
pub async fn update_field(
    State(state): State<AppState>,
    Json(request): Json<FieldRequest>,
) -> Result<Json<FormView>> {
    let field: FormField = request.field.parse()?;
    let form = state
        .try_with_shop(|shop| {
            shop.update_form_field(field, &request.value)
                .map(FormView::from)
        })
        .await?;
    Ok(Json(form))
}

/// Save the open form.
#[instrument(skip(state))]
pub async fn submit_form(State(state): State<AppState>) -> Result<Json<Product>> {
    let product = state.try_with_shop(|shop| shop.submit_product_form()).await?;
    Ok(Json(product))
}

/// Discard the open form.
#[instrument(skip(state))]
pub async fn close_form(State(state): State<AppState>) -> Result<StatusCode> {
    state.with_shop(|shop| shop.close_product_form()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product from the catalog.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    state.with_shop(|shop| shop.delete_product(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
