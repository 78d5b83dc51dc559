//! API error types with IntoResponse
//!
//! Clients get the status and its reason phrase as plain text. The one
//! exception is `Storage`, which surfaces the raw storage error text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API error type with HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed path parameter or JSON body (400)
    BadRequest { reason: String },

    /// No live row for the requested id (404)
    NotFound,

    /// Write failed; raw error text goes to the client (500)
    Storage { detail: String },

    /// Internal error, logged but not surfaced (500)
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::BadRequest {
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Storage { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let reason = status.canonical_reason().unwrap_or_default();

        match self {
            Self::BadRequest { reason: why } => {
                tracing::debug!("Bad request: {}", why);
                (status, reason).into_response()
            }
            Self::NotFound => (status, reason).into_response(),
            Self::Storage { detail } => {
                tracing::error!("Storage error: {}", detail);
                (status, detail).into_response()
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (status, reason).into_response()
            }
        }
    }
}
