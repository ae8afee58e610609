//! API error taxonomy
//!
//! Every handler returns `Result<_, ApiError>`. Each variant carries its own
//! HTTP status and renders as `{"success": false, "error": <message>}`, so a
//! failed request never leaks a half-written response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::models::ModelError;

/// Errors a request handler can surface to the caller.
///
/// Soft prediction failures (an out-of-table class index) are a business
/// branch of the handler, not an error variant: they respond 200 with
/// `success: false`. Persistence failures are absorbed by the store gateway
/// and never appear here.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required request field is absent. Named after the first missing
    /// field in declared order.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// The model backing this endpoint was not loaded at startup.
    #[error("{0} model not available")]
    ModelUnavailable(&'static str),

    /// Disease detection: the multipart body had no `file` part.
    #[error("No file uploaded")]
    NoFileUploaded,

    /// Disease detection: the `file` part carried an empty filename.
    #[error("No file selected")]
    NoFileSelected,

    /// Weather proxy: the upstream API answered non-200 for the location.
    #[error("Location not found")]
    LocationNotFound,

    /// Weather proxy: no API key configured.
    #[error("Weather API key not configured")]
    WeatherKeyMissing,

    /// History: no persistence store configured.
    #[error("Database not configured")]
    DatabaseNotConfigured,

    /// Catch-all: field coercion failures, image decode errors, model
    /// evaluation errors. Surfaced with the raw error text.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error class.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) | ApiError::NoFileUploaded | ApiError::NoFileSelected => {
                StatusCode::BAD_REQUEST
            }
            ApiError::LocationNotFound => StatusCode::NOT_FOUND,
            ApiError::ModelUnavailable(_)
            | ApiError::WeatherKeyMissing
            | ApiError::DatabaseNotConfigured
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Convenience Result type for handler code.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
