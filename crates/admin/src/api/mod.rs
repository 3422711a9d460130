//! REST backend client for the dashboard.
//!
//! Every call except login carries the signed-in admin's bearer token. Nothing
//! is cached: the dashboard always shows what the backend has right now.

mod client;
pub mod types;

pub use client::AdminApiClient;
pub use types::*;

use bazaar_core::{EnvelopeError, ValidationErrors};
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status not covered below.
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Request was rejected with field validation errors (HTTP 422).
    #[error("Validation failed: {}", .0.all_messages().join("; "))]
    Validation(ValidationErrors),

    /// Resource not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Token missing, expired or revoked (HTTP 401/403).
    #[error("Unauthorized")]
    Unauthorized,

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Body did not have the expected shape.
    #[error("Unexpected response shape: {0}")]
    Envelope(#[from] EnvelopeError),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Failed to build a request URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Whether the error is the backend's fault rather than the caller's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status >= 500,
            Self::Http(_) | Self::Envelope(_) | Self::Parse(_) => true,
            _ => false,
        }
    }
}

pub(crate) fn error_for_status(
    status: StatusCode,
    retry_after: Option<u64>,
    path: &str,
    body: &str,
) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound(path.to_string()),
        StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation(ValidationErrors::from_body(body)),
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited(retry_after.unwrap_or(1)),
        _ => ApiError::Status {
            status: status.as_u16(),
            body: body.chars().take(200).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            error_for_status(StatusCode::FORBIDDEN, None, "admin/orders", ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            error_for_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                None,
                "admin/products",
                r#"{"message":"Invalid","errors":{"price":["The price must be at least 0."]}}"#
            ),
            ApiError::Validation(errors) if errors.first("price") == Some("The price must be at least 0.")
        ));
        assert!(matches!(
            error_for_status(StatusCode::TOO_MANY_REQUESTS, Some(30), "login", ""),
            ApiError::RateLimited(30)
        ));
    }

    #[test]
    fn test_server_errors() {
        let err = error_for_status(StatusCode::BAD_GATEWAY, None, "admin/orders", "upstream");
        assert!(err.is_server_error());
        assert!(!ApiError::Unauthorized.is_server_error());
        assert!(!ApiError::NotFound("x".into()).is_server_error());
    }
}
