use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Convenient Result alias.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
///
/// Every failure a request can hit maps to one variant, and each variant to
/// one status code. Raw I/O errors are wrapped before they reach a handler so
/// responses never carry stack traces or host paths.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("App not found: {0}")]
    AppNotFound(String),

    #[error("No file available for this app")]
    NoFileAvailable,

    #[error("File not found on server")]
    FileNotFound,

    #[error("Access denied")]
    AccessDenied,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Catalog storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::AppNotFound(_) | Self::NoFileAvailable | Self::FileNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::AccessDenied => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = json!({
            "error": {
                "code": status.as_u16(),
                "message": self.to_string(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}
