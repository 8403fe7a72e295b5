use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::intake::document::DocumentError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only input problems reach the client. Pipeline stage failures are folded
/// into default results and never become an `AppError`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Invalid multipart body: {e}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Document(e) => match e {
                DocumentError::InvalidUrl(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
                }
                DocumentError::Fetch(_) | DocumentError::DownloadStatus { .. } => {
                    tracing::warn!("Document fetch failed: {e}");
                    (StatusCode::BAD_GATEWAY, "DOCUMENT_FETCH_ERROR", e.to_string())
                }
                DocumentError::Pdf(_) | DocumentError::Empty => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNPROCESSABLE_DOCUMENT",
                    e.to_string(),
                ),
            },
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
