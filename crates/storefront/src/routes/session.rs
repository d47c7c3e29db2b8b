//! Session-wide state: load status, viewing role, current notice.

use axum::{Json, extract::State};
use gemini_store_core::UserRole;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::notice::Notice;
use crate::state::{AppState, StatusSnapshot};

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleView {
    pub role: UserRole,
    pub is_admin: bool,
}

impl From<UserRole> for RoleView {
    fn from(role: UserRole) -> Self {
        Self {
            role,
            is_admin: role.is_admin(),
        }
    }
}

/// Role switch input, case-insensitive ("customer" or "admin").
#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: String,
}

/// Catalog load status. Always answers, even while loading or failed.
#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>) -> Json<StatusSnapshot> {
    Json(state.status().await)
}

#[instrument(skip(state))]
pub async fn role(State(state): State<AppState>) -> Result<Json<RoleView>> {
    let role = state.with_shop(|shop| shop.role()).await?;
    Ok(Json(RoleView::from(role)))
}

#[instrument(skip(state))]
pub async fn set_role(
    State(state): State<AppState>,
    Json(request): Json<RoleRequest>,
) -> Result<Json<RoleView>> {
    let role: UserRole = request.role.parse()?;
    state.with_shop(|shop| shop.set_role(role)).await?;
    Ok(Json(RoleView::from(role)))
}

/// The notice on screen, or `null`.
#[instrument(skip(state))]
pub async fn notice(State(state): State<AppState>) -> Json<Option<Notice>> {
    Json(state.notifier().current())
}
