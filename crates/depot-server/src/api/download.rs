//! App download endpoints — the `/download` surface.
//!
//! One route, three intents:
//!   GET  /download?id=...              — download page data for an app
//!   POST /download?id=...              — record a download attempt
//!   GET  /download?id=...&action=file  — stream the app file
//!
//! Recording and fetching are deliberately separate: POST counts the intent
//! even when no file is attached, and fetching never touches the counter.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::services::{mimetype, paths, stream};
use crate::AppState;
use depot_common::{AppError, AppResult};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/download", get(download_get).post(record_download))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct DownloadQuery {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    action: Option<String>,
}

impl DownloadQuery {
    /// The id is required before anything else happens.
    fn id(&self) -> AppResult<&str> {
        self.id.as_deref().ok_or(AppError::MissingParameter("id"))
    }
}

/// GET dispatcher: `action=file` streams bytes, anything else returns the
/// download page data.
async fn download_get(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DownloadQuery>,
) -> AppResult<Response> {
    let id = query.id()?;
    match query.action.as_deref() {
        Some("file") => fetch_file(&state, id).await,
        _ => Ok(download_page(&state, id).await?.into_response()),
    }
}

// ─── Counting intent ─────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CountResponse {
    success: bool,
    downloads: u64,
    message: &'static str,
    has_file: bool,
    file_url: Option<String>,
}

/// POST /download?id=... — count a download attempt and return metadata.
///
/// The counter moves even for entries without a file: it records intent,
/// not a completed transfer.
async fn record_download(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DownloadQuery>,
) -> AppResult<Json<CountResponse>> {
    let id = query.id()?;

    let entry = state
        .catalog
        .increment_downloads(id)
        .await?
        .ok_or_else(|| AppError::AppNotFound(id.to_string()))?;

    let has_file = entry.has_file();
    tracing::info!(app_id = %entry.id, downloads = entry.download_count(), "download recorded");

    Ok(Json(CountResponse {
        success: true,
        downloads: entry.download_count(),
        message: "Download started!",
        has_file,
        file_url: has_file.then(|| format!("/download?id={}&action=file", entry.id)),
    }))
}

// ─── Presentation intent ─────────────────────────────────────

#[derive(Debug, Serialize)]
struct AppPageResponse {
    id: String,
    name: Option<String>,
    developer: Option<String>,
    version: Option<String>,
    size: Option<String>,
    file_name: Option<String>,
    has_file: bool,
    has_icon: bool,
    downloads: u64,
}

/// GET /download?id=... — the entry as the download page shows it.
/// Read-only; rendering is the caller's concern.
async fn download_page(state: &AppState, id: &str) -> AppResult<Json<AppPageResponse>> {
    let entry = state
        .catalog
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::AppNotFound(id.to_string()))?;

    let has_icon = match entry.icon.as_deref() {
        Some(icon) if !icon.is_empty() => {
            let icon_path = state.config.storage.icon_dir.join(icon);
            matches!(tokio::fs::try_exists(&icon_path).await, Ok(true))
        }
        _ => false,
    };

    Ok(Json(AppPageResponse {
        has_file: entry.has_file(),
        has_icon,
        downloads: entry.download_count(),
        id: entry.id,
        name: entry.name,
        developer: entry.developer,
        version: entry.version,
        size: entry.size,
        file_name: entry.app_file,
    }))
}

// ─── Fetch intent ────────────────────────────────────────────

/// GET /download?id=...&action=file — resolve and stream the app file.
///
/// The reported filename is the basename of the resolved path, not the
/// stored reference, so override files download under their real name.
async fn fetch_file(state: &AppState, id: &str) -> AppResult<Response> {
    let entry = state
        .catalog
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::AppNotFound(id.to_string()))?;

    if !entry.has_file() {
        return Err(AppError::NoFileAvailable);
    }

    let storage = &state.config.storage;
    let resolved = paths::resolve(
        &storage.root,
        entry.app_file.as_deref(),
        entry.app_file_path.as_deref(),
        storage.allow_overrides,
    )
    .await?;

    let metadata = tokio::fs::metadata(&resolved)
        .await
        .map_err(|_| AppError::FileNotFound)?;
    let filename = resolved
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("download");
    let content_type = mimetype::resolve(&resolved);

    tracing::info!(
        app_id = %entry.id,
        file = %resolved.display(),
        size = metadata.len(),
        content_type,
        "streaming app file"
    );

    stream::attachment(&resolved, filename, metadata.len(), content_type).await
}
