//! REST backend client for the storefront.
//!
//! # Architecture
//!
//! - The backend is source of truth - NO local persistence, direct API calls
//! - In-memory caching via `moka` for catalog reads (TTL from config)
//! - Response envelopes are normalized by `bazaar_core::envelope`
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_storefront::backend::{BackendClient, ProductQuery};
//!
//! let client = BackendClient::new(&config.backend, config.cache_ttl)?;
//!
//! let page = client.products(&ProductQuery::default()).await?;
//! let product = client.product(page.items[0].id).await?;
//! ```

mod cache;
mod client;
pub mod types;

pub use client::BackendClient;
pub use types::*;

use bazaar_core::{EnvelopeError, ValidationErrors};
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
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

    /// Missing or rejected credentials (HTTP 401/403).
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

impl BackendError {
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

/// Map a non-success response to an error.
///
/// `retry_after` is the parsed `Retry-After` header, if any.
pub(crate) fn error_for_status(
    status: StatusCode,
    retry_after: Option<u64>,
    path: &str,
    body: &str,
) -> BackendError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Unauthorized,
        StatusCode::NOT_FOUND => BackendError::NotFound(path.to_string()),
        StatusCode::UNPROCESSABLE_ENTITY => {
            BackendError::Validation(ValidationErrors::from_body(body))
        }
        StatusCode::TOO_MANY_REQUESTS => BackendError::RateLimited(retry_after.unwrap_or(1)),
        _ => BackendError::Status {
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
            error_for_status(StatusCode::UNAUTHORIZED, None, "orders", ""),
            BackendError::Unauthorized
        ));
        assert!(matches!(
            error_for_status(StatusCode::NOT_FOUND, None, "products/9", ""),
            BackendError::NotFound(path) if path == "products/9"
        ));
        assert!(matches!(
            error_for_status(StatusCode::TOO_MANY_REQUESTS, Some(30), "x", ""),
            BackendError::RateLimited(30)
        ));
        assert!(matches!(
            error_for_status(StatusCode::TOO_MANY_REQUESTS, None, "x", ""),
            BackendError::RateLimited(1)
        ));
    }

    #[test]
    fn test_validation_body_is_parsed() {
        let err = error_for_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            None,
            "contact",
            r#"{"message":"invalid","errors":{"email":["Bad email"]}}"#,
        );
        let BackendError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.first("email"), Some("Bad email"));
    }

    #[test]
    fn test_server_error_body_is_truncated() {
        let body = "x".repeat(1000);
        let err = error_for_status(StatusCode::INTERNAL_SERVER_ERROR, None, "x", &body);
        let BackendError::Status { status, body } = err else {
            panic!("expected status error");
        };
        assert_eq!(status, 500);
        assert_eq!(body.len(), 200);
    }

    #[test]
    fn test_is_server_error() {
        assert!(BackendError::Status { status: 503, body: String::new() }.is_server_error());
        assert!(!BackendError::Status { status: 409, body: String::new() }.is_server_error());
        assert!(!BackendError::NotFound("x".into()).is_server_error());
        assert!(!BackendError::Validation(ValidationErrors::default()).is_server_error());
    }
}
