//! # Market Service
//!
//! Business logic for the dashboard's market data: coin details and charts,
//! trending coins, categories and the paged coin listing.
//!
//! ## Overview
//!
//! Each method is one or two [`CoinGeckoClient`] calls with the query the
//! CoinGecko endpoint expects, plus the small amount of shaping a page needs
//! (truncating trending and categories, converting OHLC arrays).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lib_coingecko::CoinGeckoClient;
//! use lib_core::{dto::ChartPeriod, Config};
//! use lib_web::services::MarketService;
//! use std::sync::Arc;
//!
//! # async fn example() -> lib_core::Result<()> {
//! let client = Arc::new(CoinGeckoClient::new(&Config::from_env()?)?);
//! let service = MarketService::new(client);
//!
//! let overview = service.coin_overview("bitcoin", ChartPeriod::Day).await?;
//! let coins = service.coins_page(1, 10).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, AppError>` straight from the client:
//! - `AppError::RemoteApi` - CoinGecko answered with a non-2xx status
//! - `AppError::MalformedResponse` - The body did not match the DTO
//! - `AppError::Http` - The request never completed
//! - `AppError::InvalidInput` - The coin id cannot be used in a URL path
//!
//! ## Architecture
//!
//! ```text
//! MarketService → CoinGeckoClient → (ResponseCache | CoinGecko REST API)
//! ```

use lib_coingecko::{CoinGeckoClient, QueryParams};
use lib_core::dto::{Category, ChartPeriod, CoinDetails, CoinMarketData, OhlcPoint, TrendingCoin, TrendingResponse, OHLC};
use lib_core::{AppError, Result};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Quote currency for every price on the dashboard.
pub const VS_CURRENCY: &str = "usd";

/// Coin details plus candles for one chart period.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinOverview {
    pub coin: CoinDetails,
    pub ohlc: Vec<OHLC>,
    pub period: ChartPeriod,
}

/// Service for market data operations.
pub struct MarketService {
    client: Arc<CoinGeckoClient>,
}

impl MarketService {
    pub fn new(client: Arc<CoinGeckoClient>) -> Self {
        Self { client }
    }

    /// Details for one coin.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidInput` - `id` is empty or contains path characters
    /// * `AppError::RemoteApi` with status 404 - CoinGecko does not know the coin
    #[instrument(skip(self))]
    pub async fn coin_details(&self, id: &str) -> Result<CoinDetails> {
        let id = validate_coin_id(id)?;
        let params = QueryParams::new().with("dex_pair_format", "symbol");

        self.client.fetch(&format!("coins/{}", id), &params).await
    }

    /// Candles for one coin over `period`, oldest first.
    #[instrument(skip(self), fields(days = period.days()))]
    pub async fn coin_ohlc(&self, id: &str, period: ChartPeriod) -> Result<Vec<OHLC>> {
        let id = validate_coin_id(id)?;
        let params = QueryParams::new()
            .with("vs_currency", VS_CURRENCY)
            .with("days", period.days())
            .with("precision", "full");

        let points: Vec<OhlcPoint> = self
            .client
            .fetch(&format!("coins/{}/ohlc", id), &params)
            .await?;

        debug!("Fetched {} candles for {}", points.len(), id);
        Ok(points.into_iter().map(OHLC::from).collect())
    }

    /// Details and candles fetched together. Fails if either fails.
    pub async fn coin_overview(&self, id: &str, period: ChartPeriod) -> Result<CoinOverview> {
        let (coin, ohlc) = tokio::try_join!(self.coin_details(id), self.coin_ohlc(id, period))?;

        Ok(CoinOverview { coin, ohlc, period })
    }

    /// The first `limit` trending coins.
    #[instrument(skip(self))]
    pub async fn trending_coins(&self, limit: usize) -> Result<Vec<TrendingCoin>> {
        let response: TrendingResponse = self
            .client
            .fetch("search/trending", &QueryParams::new())
            .await?;

        Ok(response.into_coins().into_iter().take(limit).collect())
    }

    /// The first `limit` categories in the order CoinGecko returns them.
    #[instrument(skip(self))]
    pub async fn top_categories(&self, limit: usize) -> Result<Vec<Category>> {
        let categories: Vec<Category> = self
            .client
            .fetch("coins/categories", &QueryParams::new())
            .await?;

        Ok(categories.into_iter().take(limit).collect())
    }

    /// One page of coins ordered by market cap.
    #[instrument(skip(self))]
    pub async fn coins_page(&self, page: u32, per_page: u32) -> Result<Vec<CoinMarketData>> {
        let params = QueryParams::new()
            .with("vs_currency", VS_CURRENCY)
            .with("order", "market_cap_desc")
            .with("per_page", per_page)
            .with("page", page.max(1))
            .with("sparkline", "false")
            .with("price_change_percentage", "24h");

        self.client.fetch("coins/markets", &params).await
    }
}

/// Accept ids made of ASCII letters, digits, `-`, `_` and `.`.
fn validate_coin_id(id: &str) -> Result<&str> {
    let id = id.trim();
    let valid = !id.is_empty()
        && id != "."
        && !id.contains("..")
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(id)
    } else {
        Err(AppError::InvalidInput(format!("Invalid coin id: {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coin_id() {
        assert_eq!(validate_coin_id("bitcoin").ok(), Some("bitcoin"));
        assert_eq!(validate_coin_id(" usd-coin ").ok(), Some("usd-coin"));
        assert!(validate_coin_id("wrapped_steth.v2").is_ok());

        for bad in ["", " ", ".", "..", "../admin", "coins/bitcoin", "bit coin", "btc?x=1"] {
            assert!(
                matches!(validate_coin_id(bad), Err(AppError::InvalidInput(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }
}
