//! # Dashboard Column Sets
//!
//! The three market tables and their skeletons, expressed as
//! [`DataTable`] definitions over the DTOs from `lib_core::dto`.
//!
//! | Table      | Columns                                                 | Row key   |
//! |------------|---------------------------------------------------------|-----------|
//! | Coins      | Rank, Token, Price, 24h Change, Market Cap              | coin id   |
//! | Trending   | Name, 24h Change, Price                                 | coin id   |
//! | Categories | Category, Top Gainers, 24h Change, Market Cap, 24h Volume | row index |
//!
//! Skeletons reuse the same headers with placeholder cells, so a section that
//! failed to load keeps the shape of the real table.

use super::cell::{Cell, Trend};
use crate::table::{Column, DataTable, Grid, TableStyle};
use lib_core::dto::{Category, CoinMarketData, TrendingCoin};
use lib_utils::{format_percentage, format_usd};

/// Rows shown in the coins skeleton, one full page.
pub const COINS_SKELETON_ROWS: usize = 10;
/// Rows shown in the trending skeleton.
pub const TRENDING_SKELETON_ROWS: usize = 6;
/// Rows shown in the categories skeleton.
pub const CATEGORIES_SKELETON_ROWS: usize = 10;

const COIN_HEADERS: [&str; 5] = ["Rank", "Token", "Price", "24h Change", "Market Cap"];
const TRENDING_HEADERS: [&str; 3] = ["Name", "24h Change", "Price"];
const CATEGORY_HEADERS: [&str; 5] = ["Category", "Top Gainers", "24h Change", "Market Cap", "24h Volume"];

fn coin_href(id: &str) -> String {
    format!("/coins/{}", id)
}

fn usd_or_dash(value: Option<f64>) -> Cell {
    Cell::text(value.map(format_usd).unwrap_or_else(|| "-".to_string()))
}

/// Percentage with an explicit `+` on gains.
fn signed_change(change: Option<f64>) -> Cell {
    let trend = Trend::from_change(change);
    let text = format_percentage(change);
    let text = if trend.is_up() { format!("+{}", text) } else { text };
    Cell::Change(text, trend)
}

fn unsigned_change(change: Option<f64>) -> Cell {
    Cell::Change(format_percentage(change), Trend::from_change(change))
}

fn change_with_icon(change: Option<f64>) -> Cell {
    Cell::ChangeIcon(format_percentage(change), Trend::from_change(change))
}

// region:    --- Coins

/// All-coins table, keyed by coin id.
pub fn coins_table<'a>() -> DataTable<'a, CoinMarketData, Cell> {
    DataTable::new(|coin: &CoinMarketData, _| coin.id.clone())
        .column(
            Column::new(COIN_HEADERS[0], |coin: &CoinMarketData, _| {
                let rank = coin
                    .market_cap_rank
                    .map(|rank| format!("#{}", rank))
                    .unwrap_or_else(|| "-".to_string());
                Cell::Link(coin_href(&coin.id), rank)
            })
            .header_class("rank")
            .cell_class("rank-cell"),
        )
        .column(
            Column::new(COIN_HEADERS[1], |coin: &CoinMarketData, _| {
                let label = format!("{} ({})", coin.name, coin.symbol.to_uppercase());
                Cell::Token(coin_href(&coin.id), coin.image.clone(), label)
            })
            .header_class("token")
            .cell_class("token-cell"),
        )
        .column(
            Column::new(COIN_HEADERS[2], |coin: &CoinMarketData, _| usd_or_dash(coin.current_price))
                .cell_class("price-cell"),
        )
        .column(
            Column::new(COIN_HEADERS[3], |coin: &CoinMarketData, _| {
                signed_change(coin.price_change_percentage_24h)
            })
            .cell_class("change-cell"),
        )
        .column(
            Column::new(COIN_HEADERS[4], |coin: &CoinMarketData, _| usd_or_dash(coin.market_cap))
                .header_class("market-cap")
                .cell_class("market-cap-cell"),
        )
        .style(TableStyle::default().table("coins-table"))
}

pub fn coins_skeleton() -> Grid<Cell> {
    skeleton(
        &COIN_HEADERS,
        &[
            vec!["skeleton-rank"],
            vec!["skeleton-icon", "skeleton-name"],
            vec!["skeleton-price"],
            vec!["skeleton-change"],
            vec!["skeleton-market-cap"],
        ],
        COINS_SKELETON_ROWS,
        "coins-table",
    )
}

// endregion: --- Coins

// region:    --- Trending

/// Trending coins table, keyed by coin id.
pub fn trending_table<'a>() -> DataTable<'a, TrendingCoin, Cell> {
    DataTable::new(|coin: &TrendingCoin, _| coin.id.clone())
        .column(
            Column::new(TRENDING_HEADERS[0], |coin: &TrendingCoin, _| {
                Cell::Token(coin_href(&coin.id), coin.large.clone(), coin.name.clone())
            })
            .cell_class("name-cell"),
        )
        .column(
            Column::new(TRENDING_HEADERS[1], |coin: &TrendingCoin, _| unsigned_change(coin.usd_change_24h()))
                .cell_class("change-cell"),
        )
        .column(
            Column::new(TRENDING_HEADERS[2], |coin: &TrendingCoin, _| usd_or_dash(coin.data.price))
                .cell_class("price-cell"),
        )
        .style(TableStyle::default().table("trending-coins-table").header_row("bg-dark-400"))
}

pub fn trending_skeleton() -> Grid<Cell> {
    skeleton(
        &TRENDING_HEADERS,
        &[
            vec!["skeleton-icon", "skeleton-name"],
            vec!["skeleton-change"],
            vec!["skeleton-price"],
        ],
        TRENDING_SKELETON_ROWS,
        "trending-coins-table",
    )
}

// endregion: --- Trending

// region:    --- Categories

/// Categories table. Names are not unique, so rows are keyed by position.
pub fn categories_table<'a>() -> DataTable<'a, Category, Cell> {
    DataTable::new(|_: &Category, index| index.to_string())
        .column(
            Column::new(CATEGORY_HEADERS[0], |category: &Category, _| Cell::text(category.name.clone()))
                .cell_class("category-cell"),
        )
        .column(
            Column::new(CATEGORY_HEADERS[1], |category: &Category, _| {
                Cell::Images(category.top_3_coins.clone())
            })
            .cell_class("top-gainers-cell"),
        )
        .column(
            Column::new(CATEGORY_HEADERS[2], |category: &Category, _| {
                change_with_icon(category.market_cap_change_24h)
            })
            .cell_class("change-cell"),
        )
        .column(
            Column::new(CATEGORY_HEADERS[3], |category: &Category, _| usd_or_dash(category.market_cap))
                .cell_class("market-cap-cell"),
        )
        .column(
            Column::new(CATEGORY_HEADERS[4], |category: &Category, _| usd_or_dash(category.volume_24h))
                .cell_class("volume-cell"),
        )
        .style(TableStyle::default().table("categories-table").header_row("bg-dark-400"))
}

pub fn categories_skeleton() -> Grid<Cell> {
    skeleton(
        &CATEGORY_HEADERS,
        &[
            vec!["skeleton-name"],
            vec!["skeleton-icon", "skeleton-icon", "skeleton-icon"],
            vec!["skeleton-change"],
            vec!["skeleton-market-cap"],
            vec!["skeleton-volume"],
        ],
        CATEGORIES_SKELETON_ROWS,
        "categories-table",
    )
}

// endregion: --- Categories

/// Placeholder grid with the given headers and per-column block classes.
fn skeleton(
    headers: &[&'static str],
    blocks: &[Vec<&'static str>],
    rows: usize,
    table_class: &str,
) -> Grid<Cell> {
    let placeholders: Vec<usize> = (0..rows).collect();

    DataTable::new(|row: &usize, _| format!("skeleton-{}", row))
        .columns(headers.iter().zip(blocks).map(|(header, blocks)| {
            let blocks = blocks.clone();
            Column::new(*header, move |_: &usize, _| Cell::Skeleton(blocks.clone()))
        }))
        .style(TableStyle::default().table(table_class).body_row("skeleton-row"))
        .render(&placeholders)
}
