//! Catalog grid: search and pagination.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::store::CatalogPage;

/// Search box input.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub term: String,
}

/// Page jump input.
#[derive(Debug, Deserialize)]
pub struct PageRequest {
    pub page: i64,
}

/// Current catalog page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<CatalogPage>> {
    let page = state.with_shop(|shop| shop.catalog_page()).await?;
    Ok(Json(page))
}

/// Change the search term; always lands on page 1.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<CatalogPage>> {
    let page = state
        .with_shop(|shop| {
            shop.search(request.term);
            shop.catalog_page()
        })
        .await?;
    Ok(Json(page))
}

/// Jump to a page (clamped to the valid range).
#[instrument(skip(state))]
pub async fn go_to_page(
    State(state): State<AppState>,
    Json(request): Json<PageRequest>,
) -> Result<Json<CatalogPage>> {
    let page = state
        .with_shop(|shop| {
            shop.go_to_page(request.page);
            shop.catalog_page()
        })
        .await?;
    Ok(Json(page))
}

#[instrument(skip(state))]
pub async fn next(State(state): State<AppState>) -> Result<Json<CatalogPage>> {
    let page = state
        .with_shop(|shop| {
            shop.next_page();
            shop.catalog_page()
        })
        .await?;
    Ok(Json(page))
}

#[instrument(skip(state))]
pub async fn previous(State(state): State<AppState>) -> Result<Json<CatalogPage>> {
    let page = state
        .with_shop(|shop| {
            shop.previous_page();
            shop.catalog_page()
        })
        .await?;
    Ok(Json(page))
}
