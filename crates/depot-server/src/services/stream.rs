//! Streams a resolved file to the client as an attachment.

use std::path::Path;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use tokio_util::io::ReaderStream;

use depot_common::{AppError, AppResult};

/// Build the download response for an already-resolved file.
///
/// The body streams in chunks rather than buffering the file. The file is
/// opened before any header is emitted, so a file that vanished after
/// resolution still surfaces as a clean 404; a read error after that point
/// can only abort the transfer, and the closed stream is the whole signal.
/// Client disconnects drop the stream and release the file handle.
pub async fn attachment(
    path: &Path,
    filename: &str,
    size: u64,
    content_type: &str,
) -> AppResult<Response> {
    let file = tokio::fs::File::open(path).await.map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "resolved file could not be opened");
        AppError::FileNotFound
    })?;

    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .header(header::CONTENT_LENGTH, size)
        .header(header::CACHE_CONTROL, "no-cache, must-revalidate")
        .header(header::EXPIRES, "0")
        .header(header::PRAGMA, "public")
        .body(body)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to build response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn sets_download_framing_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app1.apk");
        std::fs::write(&path, vec![0u8; 64]).unwrap();

        let response = attachment(&path, "app1.apk", 64, "application/vnd.android.package-archive")
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::CONTENT_TYPE.as_str()],
            "application/vnd.android.package-archive"
        );
        assert_eq!(
            headers[header::CONTENT_DISPOSITION.as_str()],
            "attachment; filename=\"app1.apk\""
        );
        assert_eq!(headers[header::CONTENT_LENGTH.as_str()], "64");
        assert_eq!(
            headers[header::CACHE_CONTROL.as_str()],
            "no-cache, must-revalidate"
        );
        assert_eq!(headers[header::EXPIRES.as_str()], "0");
    }

    #[tokio::test]
    async fn vanished_file_is_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.apk");

        assert!(matches!(
            attachment(&path, "gone.apk", 0, "application/octet-stream").await,
            Err(AppError::FileNotFound)
        ));
    }
}
