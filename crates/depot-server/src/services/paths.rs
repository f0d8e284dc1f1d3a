//! Resolves catalog file references to paths confined to the storage root.
//!
//! A `file_ref` is joined onto the root and only served if its canonical
//! form (symlinks and `..` resolved) still lies under the canonical root.
//! An entry's override path is the one sanctioned escape hatch: it is used
//! only when overrides are administratively enabled, the joined candidate
//! does not exist, and the override target itself does.

use std::path::{Path, PathBuf};

use depot_common::{AppError, AppResult};

/// Resolve a file reference against the storage root.
///
/// Rejects with `NoFileAvailable` when there is nothing to resolve,
/// `FileNotFound` when nothing exists on disk at any permitted location,
/// and `AccessDenied` when the reference escapes the root.
pub async fn resolve(
    root: &Path,
    file_ref: Option<&str>,
    override_path: Option<&Path>,
    allow_override: bool,
) -> AppResult<PathBuf> {
    let file_ref = file_ref.filter(|f| !f.is_empty());
    let override_path = if allow_override { override_path } else { None };

    if file_ref.is_none() && override_path.is_none() {
        return Err(AppError::NoFileAvailable);
    }

    if let Some(name) = file_ref {
        let candidate = root.join(name);
        if exists(&candidate).await {
            // Canonicalize both sides; a crafted name or a symlink that
            // leaves the root fails the prefix check.
            let real_candidate = canonicalize(&candidate).await?;
            let real_root = canonicalize(root).await?;
            if !real_candidate.starts_with(&real_root) {
                tracing::warn!(
                    candidate = %candidate.display(),
                    "file reference escapes the storage root"
                );
                return Err(AppError::AccessDenied);
            }
            return Ok(real_candidate);
        }
    }

    if let Some(override_path) = override_path {
        if exists(override_path).await {
            tracing::debug!(path = %override_path.display(), "serving override path");
            return Ok(override_path.to_path_buf());
        }
    }

    Err(AppError::FileNotFound)
}

async fn exists(path: &Path) -> bool {
    matches!(tokio::fs::try_exists(path).await, Ok(true))
}

async fn canonicalize(path: &Path) -> AppResult<PathBuf> {
    // The path was just seen on disk; losing the race maps back into the
    // taxonomy rather than leaking a raw I/O error.
    tokio::fs::canonicalize(path)
        .await
        .map_err(|_| AppError::FileNotFound)
}
