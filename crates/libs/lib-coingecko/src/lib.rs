//! # CoinGecko Integration
//!
//! Data fetcher for the CoinGecko market-data API.
//!
//! ## Modules
//!
//! - [`client`] - HTTP client with uniform error mapping
//! - [`query`] - Query parameters with null/empty filtering
//! - [`cache`] - Time-based revalidation cache for response bodies

pub mod cache;
pub mod client;
pub mod query;

pub use cache::ResponseCache;
pub use client::{CoinGeckoClient, API_KEY_HEADER};
pub use query::{ParamValue, QueryParams};
