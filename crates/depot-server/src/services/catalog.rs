//! App catalog persistence.
//!
//! The catalog is a single pretty-printed JSON array, loaded wholesale and
//! rewritten wholesale on every mutation. Reads go straight to disk; every
//! load-modify-save sequence is serialized behind one mutex so concurrent
//! counter increments cannot overwrite each other.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use depot_common::{AppError, AppResult};

/// One catalog record describing a single downloadable app.
///
/// Only `id`, the file reference fields, and `downloads` are interpreted.
/// The descriptive fields and anything in `extra` are carried through
/// untouched, so catalogs written by the admin tooling survive a load/save
/// cycle with their content intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// File name relative to the storage root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_file: Option<String>,
    /// Administrative absolute-path override, trusted outside the storage
    /// root when overrides are enabled. See `services::paths`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_file_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
    /// Fields this server does not interpret, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogEntry {
    /// Whether the entry has a real file attached.
    pub fn has_file(&self) -> bool {
        self.app_file.as_deref().is_some_and(|f| !f.is_empty())
    }

    /// Download count, treating an absent counter as zero.
    pub fn download_count(&self) -> u64 {
        self.downloads.unwrap_or(0)
    }
}

/// Durable store for the app catalog.
pub struct CatalogStore {
    path: PathBuf,
    /// Single-writer gate for all mutations.
    write_gate: Mutex<()>,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_gate: Mutex::new(()),
        }
    }

    /// Read the full catalog.
    ///
    /// A missing file is the valid empty state. A file that exists but does
    /// not parse is an error: treating it as empty would zero every counter
    /// on the next save.
    pub async fn load_all(&self) -> AppResult<Vec<CatalogEntry>> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "failed to read catalog");
                return Err(AppError::Storage("failed to read catalog".into()));
            }
        };

        serde_json::from_str(&data).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "catalog file is corrupt");
            AppError::Storage("catalog file is corrupt".into())
        })
    }

    /// Find an entry by exact id match. First match wins.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<CatalogEntry>> {
        let entries = self.load_all().await?;
        Ok(entries.into_iter().find(|e| e.id == id))
    }

    /// Increment the download counter for `id` and persist the catalog.
    ///
    /// Returns the updated entry, or `None` (with nothing written) when the
    /// id is unknown. The whole read-modify-write runs under the write gate.
    pub async fn increment_downloads(&self, id: &str) -> AppResult<Option<CatalogEntry>> {
        let _guard = self.write_gate.lock().await;

        let mut entries = self.load_all().await?;
        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        entry.downloads = Some(entry.download_count() + 1);
        let updated = entry.clone();

        self.persist(&entries).await?;
        Ok(Some(updated))
    }

    /// Replace the whole catalog.
    pub async fn save_all(&self, entries: &[CatalogEntry]) -> AppResult<()> {
        let _guard = self.write_gate.lock().await;
        self.persist(entries).await
    }

    /// Serialize and write the collection. Callers must hold the write gate.
    ///
    /// Ids must be unique: a duplicate would make `find_by_id`'s first-match
    /// scan silently ambiguous, so it is rejected here at write time.
    async fn persist(&self, entries: &[CatalogEntry]) -> AppResult<()> {
        let mut seen = HashSet::new();
        for entry in entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(AppError::Conflict(format!(
                    "duplicate catalog id: {}",
                    entry.id
                )));
            }
        }

        // serde_json leaves non-ASCII text unescaped, so pretty-printing
        // preserves Unicode names as-is.
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Storage(format!("failed to serialize catalog: {e}")))?;

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "failed to write catalog");
            AppError::Storage("failed to persist catalog".into())
        })
    }
}
