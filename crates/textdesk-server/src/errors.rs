//! HTTP error mapping.
//!
//! Every failure leaves the server as `{ "error": "<message>" }`. Client
//! errors carry a specific message; internal errors are logged and reported
//! with a fixed generic message.

use std::any::Any;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use textdesk_core::ValidationError;
use thiserror::Error;

use crate::metrics::VALIDATION_FAILURES_TOTAL;

/// Message returned for any 5xx.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong!";

/// Errors returned by API handlers and extractors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required input missing or blank.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Body could not be decoded (bad JSON, wrong field types).
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    /// Body exceeded the configured limit.
    #[error("request body too large")]
    PayloadTooLarge,
    /// Unexpected server-side fault.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body.
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.client_message(),
            Self::MalformedBody(_) => "Invalid request body",
            Self::PayloadTooLarge => "Request body too large",
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Validation(e) => {
                metrics::counter!(VALIDATION_FAILURES_TOTAL, "field" => e.field()).increment(1);
                tracing::debug!(field = e.field(), "rejected blank input");
            }
            Self::MalformedBody(detail) => tracing::debug!(%detail, "rejected malformed body"),
            Self::PayloadTooLarge => tracing::debug!("rejected oversized body"),
            Self::Internal(detail) => tracing::error!(%detail, "internal error"),
        }
        let body = serde_json::json!({ "error": self.client_message() });
        (self.status(), Json(body)).into_response()
    }
}

/// Response for a handler panic caught by `CatchPanicLayer`.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}
