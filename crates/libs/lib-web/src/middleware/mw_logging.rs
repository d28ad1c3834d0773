//! # Request/Response Logging Middleware
//!
//! One line per request and one per response, correlated by the id from
//! [`stamp_req`](super::stamp_req). Headers are logged at debug level with
//! credentials redacted, including the CoinGecko key header in case a
//! client forwards it.
//!
//! Response level follows the status class: success at info, 4xx at warn,
//! 5xx at error.

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use lib_coingecko::API_KEY_HEADER;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::mw_req_stamp::RequestStamp;

/// Header name fragments whose values are never logged.
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "x-api-key",
    "x-auth-token",
    "authentication",
    API_KEY_HEADER,
    "x-cg-pro-api-key",
    "x-cg-demo-api-key",
];

const REDACTED: &str = "***REDACTED***";

/// Header pairs safe to log.
fn sanitized_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            if SENSITIVE_HEADERS.iter().any(|h| name_lower.contains(h)) {
                Some((name.to_string(), REDACTED.to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect()
}

/// Request/response logging middleware.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(|q| q.to_string());

    let request_id = req
        .extensions()
        .get::<RequestStamp>()
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        query = ?query,
        user_agent = ?user_agent,
        "[REQUEST] {} {}{}",
        method,
        path,
        query.as_ref().map(|q| format!("?{}", q)).unwrap_or_default()
    );

    debug!(
        request_id = %request_id,
        headers = ?sanitized_headers(req.headers()),
        "[REQUEST HEADERS]"
    );

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();
    let status_code = status.as_u16();

    let content_length = response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(0);

    if status.is_server_error() {
        error!(
            request_id = %request_id,
            status = status_code,
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} ({}ms) [SERVER ERROR]",
            method,
            path,
            status_code,
            duration.as_millis()
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            status = status_code,
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} ({}ms) [CLIENT ERROR]",
            method,
            path,
            status_code,
            duration.as_millis()
        );
    } else {
        info!(
            request_id = %request_id,
            status = status_code,
            duration_ms = duration.as_millis(),
            size_bytes = content_length,
            "[RESPONSE] {} {} -> {} ({}ms, {} bytes)",
            method,
            path,
            status_code,
            duration.as_millis(),
            content_length
        );
    }

    response
}
