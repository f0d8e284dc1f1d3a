//! API routes module.

mod download;
mod health;

use crate::AppState;
use axum::Router;
use std::sync::Arc;

/// Build the API router with all sub-routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(download::router(state))
        .merge(health::router())
}
