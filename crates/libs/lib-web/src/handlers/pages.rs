//! # Page Handlers
//!
//! Server-rendered HTML pages.
//!
//! ## Endpoints
//!
//! - `GET /` - Bitcoin overview, trending coins and top categories
//! - `GET /coins` - All coins, ten per page
//! - `GET /coins/{id}` - One coin's overview with a chart period selector
//!
//! Every section of a page is fetched on its own. A section whose fetch fails
//! is logged and replaced by its skeleton; the rest of the page still renders
//! and the response is 200. Only a template failure produces an error
//! response.

use crate::handlers::market::{ChartQuery, PageQuery};
use crate::services::market::{CoinOverview, MarketService};
use crate::views::columns::{
    categories_skeleton, categories_table, coins_skeleton, coins_table, trending_skeleton, trending_table,
};
use crate::views::templates::{
    render, render_table, CoinOverviewTemplate, CoinTemplate, CoinsTemplate, HomeTemplate, PaginationTemplate, Panel,
};
use crate::views::{period_links, OverviewView, Pagination, Section, PER_PAGE};
use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use lib_core::dto::ChartPeriod;
use lib_core::Result;
use std::sync::Arc;
use tracing::{info, instrument};

/// Coin shown in the home page overview.
pub const HOME_COIN_ID: &str = "bitcoin";
/// Trending coins listed on the home page.
pub const TRENDING_LIMIT: usize = 6;
/// Categories listed on the home page.
pub const CATEGORIES_LIMIT: usize = 10;

/// Render the overview partial for a section.
fn overview_html(section: Section<CoinOverview>, with_periods: bool) -> Result<String> {
    let (view, period) = match section {
        Section::Ready(overview) => (
            Some(OverviewView::new(&overview.coin, &overview.ohlc, overview.period)?),
            overview.period,
        ),
        Section::Loading | Section::Failed(_) => (None, ChartPeriod::default()),
    };

    let periods = if with_periods && view.is_some() {
        period_links(period)
    } else {
        Vec::new()
    };

    render(&CoinOverviewTemplate {
        overview: view.as_ref(),
        periods,
    })
}

fn panel(id: &'static str, fallback_id: &'static str, ready: bool, table: String) -> Panel {
    Panel {
        id: if ready { id } else { fallback_id },
        table,
    }
}

/// Home page.
///
/// **Route**: `GET /`
///
/// Fetches the bitcoin overview (details and 1-day candles), the trending
/// list and the categories concurrently.
#[instrument(skip(market))]
pub async fn home(State(market): State<Arc<MarketService>>) -> Result<Html<String>> {
    let (overview, trending, categories) = tokio::join!(
        market.coin_overview(HOME_COIN_ID, ChartPeriod::Day),
        market.trending_coins(TRENDING_LIMIT),
        market.top_categories(CATEGORIES_LIMIT),
    );

    let overview = Section::from_result("coin overview", overview);
    let trending = Section::from_result("trending coins", trending);
    let categories = Section::from_result("top categories", categories);

    let trending_ready = trending.is_ready();
    let trending_grid = trending.into_grid(|coins| trending_table().render(&coins), trending_skeleton);

    let categories_ready = categories.is_ready();
    let categories_grid =
        categories.into_grid(|categories| categories_table().render(&categories), categories_skeleton);

    let page = HomeTemplate {
        overview: overview_html(overview, false)?,
        trending: panel(
            "trending-coins",
            "trending-coins-fallback",
            trending_ready,
            render_table(&trending_grid)?,
        ),
        categories: panel(
            "categories",
            "categories-fallback",
            categories_ready,
            render_table(&categories_grid)?,
        ),
    };

    info!("[PAGES] Rendered home (trending: {}, categories: {})", trending_ready, categories_ready);
    Ok(Html(render(&page)?))
}

/// All-coins page.
///
/// **Route**: `GET /coins?page=N`
///
/// Invalid or missing `page` values show page 1. The pager offers a next page
/// only when this page came back full.
#[instrument(skip(market, query))]
pub async fn coins(
    State(market): State<Arc<MarketService>>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    let page = query.page();
    let section = Section::from_result("coins", market.coins_page(page, PER_PAGE).await);

    let pager = match &section {
        Section::Ready(coins) => Some(Pagination::new(page, coins.len(), PER_PAGE)),
        _ => None,
    };
    let grid = section.into_grid(|coins| coins_table().render(&coins), coins_skeleton);

    let html = render(&CoinsTemplate {
        page,
        table: render_table(&grid)?,
        pagination: render(&PaginationTemplate { pager: pager.as_ref() })?,
    })?;

    info!("[PAGES] Rendered coins page {} ({} rows)", page, grid.row_count());
    Ok(Html(html))
}

/// Coin detail page.
///
/// **Route**: `GET /coins/{id}?days=N`
///
/// An unknown `days` value falls back to one day. An unknown coin renders the
/// overview skeleton.
#[instrument(skip(market, query))]
pub async fn coin(
    State(market): State<Arc<MarketService>>,
    Path(id): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Html<String>> {
    let period = query.period().unwrap_or_default();
    let section = Section::from_result("coin overview", market.coin_overview(&id, period).await);

    let title = match &section {
        Section::Ready(overview) => overview.coin.name.clone(),
        _ => id.clone(),
    };

    let html = render(&CoinTemplate {
        title,
        overview: overview_html(section, true)?,
    })?;

    Ok(Html(html))
}

/// Liveness probe.
///
/// **Route**: `GET /health`
pub async fn health() -> &'static str {
    "OK"
}
