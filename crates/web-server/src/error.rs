// In crates/web-server/src/error.rs

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Database(#[from] database::Error),

    #[error("{0}")]
    InvalidParameters(#[from] strategies::Error),

    /// A query parameter outside its allowed range.
    #[error("{0}")]
    Validation(String),

    #[error("Need at least {required} records. Available: {available}")]
    InsufficientData { required: usize, available: i64 },

    #[error("Server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A malformed query string (e.g. `?short_window=abc`) is reported like any
/// other out-of-range parameter.
impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Database(database::Error::RecordExists)
            | Error::InvalidParameters(_)
            | Error::InsufficientData { .. } => StatusCode::BAD_REQUEST,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Database(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed.");
        } else {
            tracing::warn!(error = %self, "Request rejected.");
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
