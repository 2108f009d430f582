use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

use crate::{fetcher::FetchError, model::ErrorBody};

pub const UNKNOWN_ERROR: &str = "Unknown error occurred.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Fetch(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        match &self {
            AppError::BadRequest(msg) => tracing::debug!(message = %msg, "rejected request"),
            AppError::Fetch(err) => tracing::error!(error = %err, "page fetch failed"),
            AppError::Internal(err) => tracing::error!(error = ?err, "internal server error"),
        }

        error_response(status, self.to_string())
    }
}

/// Builds the `{"error": ...}` body, substituting the generic message when
/// the error had nothing to say.
pub fn error_response(status: StatusCode, message: String) -> axum::response::Response {
    let error = if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    };

    (status, Json(ErrorBody { error })).into_response()
}

pub type AppResult<T> = Result<T, AppError>;
