//! # Market Handlers
//!
//! JSON endpoints behind the browser-side chart and the coin listing.
//!
//! ## Endpoints
//!
//! - `GET /api/coins/{id}/ohlc` - Candles for one coin and chart period
//! - `GET /api/coins` - One page of coins with pagination metadata
//!
//! ## Request Examples
//!
//! ```bash
//! # One week of bitcoin candles
//! curl "http://localhost:3000/api/coins/bitcoin/ohlc?days=7"
//!
//! # Second page of the coin listing
//! curl "http://localhost:3000/api/coins?page=2"
//! ```
//!
//! Errors are returned as `{"error": "...", "code": "..."}` with the status
//! from [`AppError`].

use crate::services::market::MarketService;
use crate::views::pagination::{estimated_total_pages, has_more, parse_page, PER_PAGE};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use lib_core::dto::{ChartPeriod, CoinsPageResponse, OHLC};
use lib_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Query parameters for chart data.
#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    /// `1`, `7`, `14`, `30`, `90`, `180`, `365` or `max`
    pub days: Option<String>,
}

impl ChartQuery {
    /// Missing `days` means one day; anything else must be a known period.
    pub fn period(&self) -> Result<ChartPeriod, AppError> {
        match self.days.as_deref() {
            None => Ok(ChartPeriod::default()),
            Some(days) => days.parse().map_err(AppError::InvalidInput),
        }
    }
}

/// Query parameters for the paged coin listing.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Kept as text so bad values fall back to page 1 instead of a 400
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        parse_page(self.page.as_deref())
    }
}

/// Get OHLC candles for a coin.
///
/// **Route**: `GET /api/coins/{id}/ohlc`
///
/// # Parameters
///
/// - `id` (path) - CoinGecko coin id, e.g. `bitcoin`
/// - `days` (query, optional) - Chart period, default `1`
///
/// # Returns
///
/// Success (200): `Json<Vec<OHLC>>`, oldest candle first, timestamps in seconds
///
/// Error (400): Unknown `days` value or malformed coin id
/// Error (404): CoinGecko does not know the coin
/// Error (502): CoinGecko failed or returned an unexpected body
///
/// Response:
/// ```json
/// [
///   {"timestamp": 1704067200, "open": 42100.5, "high": 42300.2, "low": 41980.0, "close": 42250.9}
/// ]
/// ```
#[instrument(skip(market, query))]
pub async fn get_coin_ohlc(
    State(market): State<Arc<MarketService>>,
    Path(id): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<Vec<OHLC>>, AppError> {
    let period = query.period()?;
    debug!("[MARKET] OHLC request for {} over {} day(s)", id, period.days());

    let candles = market.coin_ohlc(&id, period).await?;

    info!("[MARKET] Returning {} candles for {}", candles.len(), id);
    Ok(Json(candles))
}

/// Get one page of coins ordered by market cap.
///
/// **Route**: `GET /api/coins`
///
/// # Parameters
///
/// - `page` (query, optional) - 1-based page number; invalid values mean page 1
///
/// # Returns
///
/// Success (200): `Json<CoinsPageResponse>` with `page`, `per_page`,
/// `has_more`, `estimated_total_pages` and `coins`
///
/// Error (502): CoinGecko failed or returned an unexpected body
#[instrument(skip(market, query))]
pub async fn get_coins(
    State(market): State<Arc<MarketService>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CoinsPageResponse>, AppError> {
    let page = query.page();
    let coins = market.coins_page(page, PER_PAGE).await?;

    info!("[MARKET] Returning {} coins for page {}", coins.len(), page);
    Ok(Json(CoinsPageResponse {
        page,
        per_page: PER_PAGE,
        has_more: has_more(coins.len(), PER_PAGE),
        estimated_total_pages: estimated_total_pages(page),
        coins,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_query_period() {
        let missing = ChartQuery { days: None };
        assert_eq!(missing.period().ok(), Some(ChartPeriod::Day));

        let week = ChartQuery { days: Some("7".into()) };
        assert_eq!(week.period().ok(), Some(ChartPeriod::Week));

        let bad = ChartQuery { days: Some("3".into()) };
        assert!(matches!(bad.period(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_page_query_defaults() {
        assert_eq!(PageQuery::default().page(), 1);
        assert_eq!(PageQuery { page: Some("x".into()) }.page(), 1);
        assert_eq!(PageQuery { page: Some("4".into()) }.page(), 4);
    }
}
