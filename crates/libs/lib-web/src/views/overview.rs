//! Coin overview header and chart data.

use lib_core::dto::{ChartPeriod, CoinDetails, OHLC};
use lib_core::{AppError, Result};
use lib_utils::format_usd;

/// Display-ready coin overview.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewView {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub image: String,
    pub price: String,
    pub days: &'static str,
    /// Candles as JSON, safe to embed inside a `<script>` element
    pub chart_json: String,
}

impl OverviewView {
    pub fn new(coin: &CoinDetails, ohlc: &[OHLC], period: ChartPeriod) -> Result<Self> {
        Ok(Self {
            id: coin.id.clone(),
            name: coin.name.clone(),
            symbol: coin.symbol.to_uppercase(),
            image: coin.image.large.clone(),
            price: coin.usd_price().map(format_usd).unwrap_or_else(|| "-".to_string()),
            days: period.days(),
            chart_json: chart_json(ohlc)?,
        })
    }
}

/// Entry in the chart period selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodLink {
    pub label: &'static str,
    pub days: &'static str,
    pub active: bool,
}

pub fn period_links(active: ChartPeriod) -> Vec<PeriodLink> {
    ChartPeriod::ALL
        .into_iter()
        .map(|period| PeriodLink {
            label: period.label(),
            days: period.days(),
            active: period == active,
        })
        .collect()
}

/// Serialize candles for inline embedding. `<` is escaped so the payload
/// cannot close the surrounding script element.
fn chart_json(ohlc: &[OHLC]) -> Result<String> {
    let json = serde_json::to_string(ohlc)
        .map_err(|e| AppError::Internal(format!("Failed to serialize chart data: {}", e)))?;

    Ok(json.replace('<', "\\u003c"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_core::dto::{CoinDetailsMarketData, CoinImage};
    use std::collections::HashMap;

    fn bitcoin() -> CoinDetails {
        CoinDetails {
            id: "bitcoin".into(),
            symbol: "btc".into(),
            name: "Bitcoin".into(),
            image: CoinImage {
                thumb: "t".into(),
                small: "s".into(),
                large: "https://img/btc-large.png".into(),
            },
            market_data: CoinDetailsMarketData {
                current_price: HashMap::from([("usd".to_string(), 67250.126)]),
            },
        }
    }

    #[test]
    fn test_overview_view() {
        let candles = [OHLC::new(1_704_067_200, 1.0, 2.0, 0.5, 1.5)];

        let view = OverviewView::new(&bitcoin(), &candles, ChartPeriod::Week)
            .expect("view should build");

        assert_eq!(view.symbol, "BTC");
        assert_eq!(view.price, "$67,250.13");
        assert_eq!(view.days, "7");
        assert_eq!(
            view.chart_json,
            r#"[{"timestamp":1704067200,"open":1.0,"high":2.0,"low":0.5,"close":1.5}]"#
        );
    }

    #[test]
    fn test_missing_price_shows_dash() {
        let mut coin = bitcoin();
        coin.market_data.current_price.clear();

        let view = OverviewView::new(&coin, &[], ChartPeriod::Day).expect("view should build");

        assert_eq!(view.price, "-");
        assert_eq!(view.chart_json, "[]");
    }

    #[test]
    fn test_period_links_mark_active() {
        let links = period_links(ChartPeriod::Month);

        assert_eq!(links.len(), ChartPeriod::ALL.len());
        assert_eq!(links.iter().filter(|link| link.active).count(), 1);
        assert!(links.iter().any(|link| link.active && link.days == "30"));
    }
}
