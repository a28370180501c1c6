//! Application error type mapping to HTTP status codes.
//!
//! Error bodies are `{"error": "<message>"}`, the shape the dashboard reads.
//! Body rejections from the `Json` extractor are rewrapped into the same
//! shape. Provider failures never reach this type; the resolver absorbs them.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use goalcoach_types::error::FeedbackError;

#[derive(Debug)]
pub enum AppError {
    Feedback(FeedbackError),
    /// Body was not JSON, or not an object the request type accepts.
    BadBody(JsonRejection),
}

impl From<FeedbackError> for AppError {
    fn from(e: FeedbackError) -> Self {
        AppError::Feedback(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadBody(rejection)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Feedback(err @ FeedbackError::MissingInput) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            // Strict mode only; the caller must supply or store a key.
            AppError::Feedback(err @ FeedbackError::NoCredentialAvailable { .. }) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::BadBody(rejection) => (rejection.status(), rejection.body_text()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
