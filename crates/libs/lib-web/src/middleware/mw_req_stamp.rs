//! # Request Stamping Middleware
//!
//! Gives every request an id and a start time. The id is stored in the request
//! extensions for handlers and the logging middleware, and echoed back in the
//! `X-Request-ID` response header.
//!
//! A caller-supplied `X-Request-ID` is kept when it is a UUID, so ids survive
//! a reverse proxy that already stamps requests.
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//! use lib_web::middleware::RequestStamp;
//!
//! async fn handler(Extension(stamp): Extension<RequestStamp>) -> String {
//!     format!("Request ID: {}", stamp.id)
//! }
//! ```

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::SystemTime;
use uuid::Uuid;

/// Header carrying the request id in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request metadata for tracing and debugging.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    pub id: String,
    pub timestamp: SystemTime,
}

impl RequestStamp {
    fn from_headers(headers: &HeaderMap) -> Self {
        let id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .unwrap_or_else(Uuid::new_v4);

        Self {
            id: id.to_string(),
            timestamp: SystemTime::now(),
        }
    }
}

/// Stamp the request and echo the id on the response.
pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::from_headers(req.headers());
    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_valid_incoming_id() {
        let mut headers = HeaderMap::new();
        headers.insert(
            REQUEST_ID_HEADER,
            HeaderValue::from_static("67e55044-10b1-426f-9247-bb680e5fe0c8"),
        );

        assert_eq!(
            RequestStamp::from_headers(&headers).id,
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
    }

    #[test]
    fn test_replaces_missing_or_invalid_id() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("not-a-uuid"));

        let stamp = RequestStamp::from_headers(&headers);
        assert_ne!(stamp.id, "not-a-uuid");
        assert!(Uuid::parse_str(&stamp.id).is_ok());

        let fresh = RequestStamp::from_headers(&HeaderMap::new());
        assert!(Uuid::parse_str(&fresh.id).is_ok());
    }
}
