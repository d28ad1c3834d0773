//! # Market Data Transfer Objects
//!
//! Read-only records received from the CoinGecko API, plus the chart and
//! listing shapes served by the dashboard's JSON endpoints.
//!
//! ## Overview
//!
//! - **Coin listings**: [`CoinMarketData`] rows from `/coins/markets`
//! - **Coin details**: [`CoinDetails`] from `/coins/{id}`
//! - **OHLC data**: [`OhlcPoint`] arrays from `/coins/{id}/ohlc`, converted into [`OHLC`]
//! - **Trending**: [`TrendingResponse`] from `/search/trending`
//! - **Categories**: [`Category`] rows from `/coins/categories`
//!
//! Records are trusted as delivered. Serde checks the shape and nothing else;
//! numeric fields the API is known to report as `null` are `Option`s.
//!
//! ## Wire Format
//!
//! All DTOs use **snake_case** field names in JSON (default serde behavior),
//! which matches the upstream API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// One row of the `/coins/markets` listing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "bitcoin",
///   "symbol": "btc",
///   "name": "Bitcoin",
///   "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
///   "current_price": 67250.12,
///   "market_cap": 1324500000000,
///   "market_cap_rank": 1,
///   "total_volume": 28000000000,
///   "price_change_percentage_24h": -1.24
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinMarketData {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

/// Coin image URLs in the sizes the API provides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoinImage {
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub small: String,
    #[serde(default)]
    pub large: String,
}

/// The subset of `market_data` the overview needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoinDetailsMarketData {
    /// Price keyed by lowercase currency code (`usd`, `eur`, ...)
    #[serde(default)]
    pub current_price: HashMap<String, f64>,
}

/// Single-coin details from `/coins/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinDetails {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: CoinImage,
    #[serde(default)]
    pub market_data: CoinDetailsMarketData,
}

impl CoinDetails {
    /// Current USD price, if the API reported one.
    pub fn usd_price(&self) -> Option<f64> {
        self.market_data.current_price.get("usd").copied()
    }
}

/// Raw OHLC entry as sent by the API: `[timestamp_ms, open, high, low, close]`.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct OhlcPoint(pub i64, pub f64, pub f64, pub f64, pub f64);

/// OHLC (Open, High, Low, Close) candlestick data for charting.
///
/// Each candle covers the period ending at `timestamp`; the API picks the
/// candle width from the requested [`ChartPeriod`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "timestamp": 1704067200,
///   "open": 42100.5,
///   "high": 42300.2,
///   "low": 41980.0,
///   "close": 42250.9
/// }
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OHLC {
    /// Unix timestamp in seconds (epoch time).
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OHLC {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    /// Get datetime from timestamp.
    ///
    /// If the timestamp is out of range, returns Unix epoch.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.timestamp, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Check if candle is bullish (close > open)
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if candle is bearish (close < open)
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Get body size (absolute difference between open and close)
    pub fn body_size(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Get wick size (total range)
    pub fn total_range(&self) -> f64 {
        self.high - self.low
    }
}

impl From<OhlcPoint> for OHLC {
    fn from(OhlcPoint(timestamp_ms, open, high, low, close): OhlcPoint) -> Self {
        Self::new(timestamp_ms / 1000, open, high, low, close)
    }
}

/// Range of history requested from the OHLC endpoint.
///
/// The API accepts only these day counts; candle width follows from the
/// range (30 minutes up to 2 days, 4 hours up to 30 days, 4 days beyond).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ChartPeriod {
    #[default]
    Day,
    Week,
    TwoWeeks,
    Month,
    Quarter,
    HalfYear,
    Year,
    Max,
}

impl ChartPeriod {
    pub const ALL: [ChartPeriod; 8] = [
        ChartPeriod::Day,
        ChartPeriod::Week,
        ChartPeriod::TwoWeeks,
        ChartPeriod::Month,
        ChartPeriod::Quarter,
        ChartPeriod::HalfYear,
        ChartPeriod::Year,
        ChartPeriod::Max,
    ];

    /// Value of the `days` query parameter.
    pub fn days(&self) -> &'static str {
        match self {
            ChartPeriod::Day => "1",
            ChartPeriod::Week => "7",
            ChartPeriod::TwoWeeks => "14",
            ChartPeriod::Month => "30",
            ChartPeriod::Quarter => "90",
            ChartPeriod::HalfYear => "180",
            ChartPeriod::Year => "365",
            ChartPeriod::Max => "max",
        }
    }

    /// Short label for the period selector.
    pub fn label(&self) -> &'static str {
        match self {
            ChartPeriod::Day => "1D",
            ChartPeriod::Week => "1W",
            ChartPeriod::TwoWeeks => "2W",
            ChartPeriod::Month => "1M",
            ChartPeriod::Quarter => "3M",
            ChartPeriod::HalfYear => "6M",
            ChartPeriod::Year => "1Y",
            ChartPeriod::Max => "Max",
        }
    }
}

impl FromStr for ChartPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ChartPeriod::ALL
            .into_iter()
            .find(|period| period.days() == wanted)
            .ok_or_else(|| {
                format!("Invalid days: {}. Must be one of: 1, 7, 14, 30, 90, 180, 365, max", s)
            })
    }
}

/// Price data attached to a trending coin.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrendingCoinData {
    #[serde(default)]
    pub price: Option<f64>,
    /// Percent change keyed by lowercase currency code
    #[serde(default)]
    pub price_change_percentage_24h: HashMap<String, f64>,
}

/// A coin from `/search/trending`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub data: TrendingCoinData,
}

impl TrendingCoin {
    pub fn usd_change_24h(&self) -> Option<f64> {
        self.data.price_change_percentage_24h.get("usd").copied()
    }
}

/// Wrapper the API puts around each trending coin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingItem {
    pub item: TrendingCoin,
}

/// Body of `/search/trending`. Only the coin list is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrendingResponse {
    #[serde(default)]
    pub coins: Vec<TrendingItem>,
}

impl TrendingResponse {
    pub fn into_coins(self) -> Vec<TrendingCoin> {
        self.coins.into_iter().map(|entry| entry.item).collect()
    }
}

/// A coin category from `/coins/categories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_change_24h: Option<f64>,
    #[serde(default)]
    pub volume_24h: Option<f64>,
    /// Image URLs of the category's three largest coins
    #[serde(default)]
    pub top_3_coins: Vec<String>,
}

/// Response body of `GET /api/coins`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinsPageResponse {
    pub page: u32,
    pub per_page: u32,
    pub has_more: bool,
    pub estimated_total_pages: u32,
    pub coins: Vec<CoinMarketData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_market_data_tolerates_nulls() {
        let json = r#"{
            "id": "bitcoin", "symbol": "btc", "name": "Bitcoin",
            "image": "https://img/btc.png",
            "current_price": 67250.12, "market_cap": null,
            "market_cap_rank": 1, "price_change_percentage_24h": null
        }"#;

        let coin: CoinMarketData = serde_json::from_str(json)
            .expect("CoinMarketData should deserialize with nulls");

        assert_eq!(coin.current_price, Some(67250.12));
        assert_eq!(coin.market_cap, None);
        assert_eq!(coin.total_volume, None);
        assert_eq!(coin.market_cap_rank, Some(1));
    }

    #[test]
    fn test_ohlc_from_api_array() {
        let points: Vec<OhlcPoint> =
            serde_json::from_str("[[1704067200000, 42100.5, 42300.2, 41980.0, 42250.9]]")
                .expect("OHLC arrays should deserialize");

        let candle = OHLC::from(points[0]);

        assert_eq!(candle.timestamp, 1_704_067_200);
        assert!(candle.is_bullish());
        assert!(!candle.is_bearish());
        assert!((candle.total_range() - 320.2).abs() < 1e-9);
        assert_eq!(candle.datetime().to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_chart_period_parse() {
        assert_eq!("7".parse::<ChartPeriod>(), Ok(ChartPeriod::Week));
        assert_eq!("MAX".parse::<ChartPeriod>(), Ok(ChartPeriod::Max));
        assert!("3".parse::<ChartPeriod>().is_err());
        assert_eq!(ChartPeriod::default().days(), "1");
    }

    #[test]
    fn test_trending_response_unwraps_items() {
        let json = r#"{"coins": [
            {"item": {"id": "pepe", "name": "Pepe", "symbol": "PEPE", "market_cap_rank": 30,
                      "thumb": "t", "large": "l",
                      "data": {"price": 0.0000112, "price_change_percentage_24h": {"usd": 5.5}}}}
        ], "nfts": []}"#;

        let coins = serde_json::from_str::<TrendingResponse>(json)
            .expect("trending body should deserialize")
            .into_coins();

        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].id, "pepe");
        assert_eq!(coins[0].usd_change_24h(), Some(5.5));
    }

    #[test]
    fn test_coin_details_usd_price() {
        let json = r#"{"id": "bitcoin", "symbol": "btc", "name": "Bitcoin",
            "image": {"thumb": "t", "small": "s", "large": "l"},
            "market_data": {"current_price": {"usd": 67000.0, "eur": 62000.0}}}"#;

        let coin: CoinDetails = serde_json::from_str(json).expect("details should deserialize");

        assert_eq!(coin.usd_price(), Some(67000.0));
        assert_eq!(coin.image.large, "l");
    }
}
