//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across all crates. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Startup Errors**
//!    - [`Config`](AppError::Config) → fatal, halts initialization
//!
//! 2. **Upstream Errors** (CoinGecko)
//!    - [`RemoteApi`](AppError::RemoteApi) → 404 when the upstream said 404, else 502
//!    - [`MalformedResponse`](AppError::MalformedResponse) → 502
//!    - [`Http`](AppError::Http) → 502
//!
//! 3. **Client Errors** (4xx)
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!
//! 4. **Server Errors**
//!    - [`Internal`](AppError::Internal) → 500 Internal Server Error
//!
//! Page handlers do not return these to the browser; they swap the failed
//! section for its skeleton. JSON handlers return them through
//! [`IntoResponse`].
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_page(raw: &str) -> Result<u32> {
//!     raw.parse()
//!         .map_err(|_| AppError::InvalidInput(format!("Invalid page: {}", raw)))
//! }
//!
//! assert!(parse_page("two").is_err());
//! ```

use thiserror::Error;
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required configuration missing or invalid at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The market-data API answered with a non-2xx status.
    ///
    /// `message` is the `error` field of the response body when present,
    /// otherwise the status reason phrase.
    #[error("API Error: {status}: {message}")]
    RemoteApi { status: u16, message: String },

    /// A 2xx response whose body did not match the expected JSON shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Transport-level failure talking to the market-data API.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Invalid user input validation error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RemoteApi { status: 404, .. } => StatusCode::NOT_FOUND,
            AppError::RemoteApi { .. } | AppError::MalformedResponse(_) | AppError::Http(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For internal errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::RemoteApi { status: 404, message } => message.clone(),
            AppError::RemoteApi { .. } | AppError::MalformedResponse(_) | AppError::Http(_) => {
                "Market data temporarily unavailable".to_string()
            }
            AppError::Config(_) | AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    /// Short variant name used as the `code` field of JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::RemoteApi { .. } => "RemoteApi",
            AppError::MalformedResponse(_) => "MalformedResponse",
            AppError::Http(_) => "Http",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Full error text goes to the server log only
        if status.is_client_error() {
            tracing::debug!("Client error: {}", self);
        } else {
            tracing::error!("Server error: {}", self);
        }

        let body = Json(json!({
            "error": self.user_message(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_api_display_carries_status_and_message() {
        let err = AppError::RemoteApi {
            status: 404,
            message: "not found".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("not found"));
    }

    #[test]
    fn test_status_codes() {
        let upstream_missing = AppError::RemoteApi { status: 404, message: "coin not found".into() };
        let upstream_down = AppError::RemoteApi { status: 503, message: "Service Unavailable".into() };

        assert_eq!(upstream_missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(upstream_down.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::Http("refused".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::InvalidInput("days".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Config("key".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::NotFound("route".into()).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_user_message_hides_internals() {
        let err = AppError::Internal("template exploded at line 3".into());
        assert_eq!(err.user_message(), "An internal error occurred");
        assert_eq!(err.code(), "Internal");
    }

    #[test]
    fn test_from_serde_json_is_malformed_response() {
        let parse_err = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        assert!(matches!(AppError::from(parse_err), AppError::MalformedResponse(_)));
    }
}
