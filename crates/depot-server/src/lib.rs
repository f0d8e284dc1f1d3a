//! # appdepot server
//!
//! HTTP front end for a server-side app catalog: serves binary packages
//! from a managed storage root, tracks per-app download counts, and keeps
//! file resolution confined to that root.

pub mod api;
pub mod services;

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use depot_common::AppConfig;
use services::catalog::CatalogStore;

/// Shared application state available to all handlers.
pub struct AppState {
    pub catalog: CatalogStore,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let catalog = CatalogStore::new(config.storage.catalog_path.clone());
        Self { catalog, config }
    }
}

/// Build the application router with security, CORS, and trace layers.
///
/// Every response carries the sniffing/framing/XSS headers, error bodies
/// included.
pub fn app(state: Arc<AppState>) -> Router {
    api::router(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
