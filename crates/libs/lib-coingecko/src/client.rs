//! # CoinGecko HTTP Client
//!
//! The single entry point for market data. Every request goes through
//! [`CoinGeckoClient::fetch`] (or [`CoinGeckoClient::fetch_with_revalidate`]),
//! which:
//!
//! 1. joins the configured base URL with the endpoint path and the filtered
//!    query string,
//! 2. serves the body from the revalidation cache when a fresh copy exists,
//! 3. otherwise issues a GET with the API-key header,
//! 4. maps non-2xx responses to [`AppError::RemoteApi`] and unparsable
//!    bodies to [`AppError::MalformedResponse`].
//!
//! There is no retry. Timeouts are whatever reqwest defaults to.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_coingecko::{CoinGeckoClient, QueryParams};
//! use lib_core::{dto::CoinMarketData, Config};
//!
//! # async fn example() -> lib_core::Result<()> {
//! let client = CoinGeckoClient::new(&Config::from_env()?)?;
//! let coins: Vec<CoinMarketData> = client
//!     .fetch("coins/markets", &QueryParams::new().with("vs_currency", "usd"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::cache::ResponseCache;
use crate::query::QueryParams;
use lib_core::{AppError, Config, Result};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x_cg_pro_api_key";

/// Error body shapes the API is known to send.
///
/// Either `{"error": "coin not found"}` or
/// `{"status": {"error_code": 429, "error_message": "..."}}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    status: Option<ErrorStatus>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorStatus {
    #[serde(default)]
    error_message: Option<String>,
}

impl ErrorBody {
    fn message(self) -> Option<String> {
        self.error
            .or_else(|| self.status.and_then(|s| s.error_message))
            .filter(|msg| !msg.trim().is_empty())
    }
}

/// HTTP client for the CoinGecko REST API.
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
    api_key: HeaderValue,
    default_revalidate: Duration,
    cache: ResponseCache,
}

impl CoinGeckoClient {
    /// Create a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when the base URL is not an absolute
    /// http(s) URL, when the API key is blank or not a valid header value,
    /// or when the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let base_url = config.coingecko_base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| AppError::Config(format!("COINGECKO_BASE_URL is not a valid URL: {}", e)))?;

        let mut api_key = HeaderValue::from_str(config.coingecko_api_key.trim()).map_err(|_| {
            AppError::Config("COINGECKO_API_KEY contains characters not allowed in a header".to_string())
        })?;
        api_key.set_sensitive(true);

        let http = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            api_key,
            default_revalidate: Duration::from_secs(config.revalidate_secs),
            cache: ResponseCache::new(),
        })
    }

    /// Default revalidation window used by [`fetch`](Self::fetch).
    pub fn default_revalidate(&self) -> Duration {
        self.default_revalidate
    }

    /// The client's response cache.
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Build the request URL for `endpoint` with `params`.
    ///
    /// A leading `/` on the endpoint is ignored, so `"/coins/bitcoin"` and
    /// `"coins/bitcoin"` address the same resource. No `?` is appended when
    /// every parameter was filtered out.
    pub fn build_url(&self, endpoint: &str, params: &QueryParams) -> Result<Url> {
        let mut raw = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));

        let query = params.to_query_string();
        if !query.is_empty() {
            raw.push('?');
            raw.push_str(&query);
        }

        Url::parse(&raw).map_err(|e| AppError::InvalidInput(format!("Invalid endpoint {}: {}", endpoint, e)))
    }

    /// Fetch `endpoint` and parse the body as `T`, using the default
    /// revalidation window.
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &str, params: &QueryParams) -> Result<T> {
        self.fetch_with_revalidate(endpoint, params, self.default_revalidate.as_secs())
            .await
    }

    /// Fetch `endpoint` and parse the body as `T`.
    ///
    /// A fresh cached body younger than `revalidate_secs` is reused without a
    /// network call. `0` always goes to the network and stores nothing.
    #[instrument(skip(self, params), fields(endpoint = %endpoint))]
    pub async fn fetch_with_revalidate<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &QueryParams,
        revalidate_secs: u64,
    ) -> Result<T> {
        let url = self.build_url(endpoint, params)?;
        let window = Duration::from_secs(revalidate_secs);

        if !window.is_zero() {
            if let Some(body) = self.cache.get(url.as_str(), window).await {
                debug!("Cache hit for {}", url.path());
                return parse_body(&body);
            }
        }

        let body: Arc<str> = Arc::from(self.get(&url).await?);
        let parsed = parse_body(&body)?;

        self.cache.insert(url.to_string(), body, window).await;

        Ok(parsed)
    }

    /// Issue the GET and return the raw body of a 2xx response.
    async fn get(&self, url: &Url) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .header(API_KEY_HEADER, self.api_key.clone())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| AppError::Http(format!("Request to {} failed: {}", url.path(), e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            let message = body
                .message()
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown Status").to_string());

            warn!(status = status.as_u16(), "Upstream error for {}: {}", url.path(), message);

            return Err(AppError::RemoteApi {
                status: status.as_u16(),
                message,
            });
        }

        response
            .text()
            .await
            .map_err(|e| AppError::Http(format!("Failed to read body from {}: {}", url.path(), e)))
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| AppError::MalformedResponse(format!("Unexpected response body: {}", e)))
}
