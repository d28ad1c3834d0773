//! # HTML Templates
//!
//! askama templates compiled from `lib-web/templates/`. Partials (table,
//! pager, overview) render to `String` first and are embedded in the page
//! templates as trusted markup; everything else goes through askama's HTML
//! escaping.

use askama::Template;
use lib_core::{AppError, Result};

use super::cell::Cell;
use super::overview::{OverviewView, PeriodLink};
use super::pagination::{PageLink, Pagination};
use crate::table::Grid;

/// Render any template, mapping failures to [`AppError::Internal`].
pub fn render<T: Template>(template: &T) -> Result<String> {
    template
        .render()
        .map_err(|e| AppError::Internal(format!("Template rendering failed: {}", e)))
}

// region:    --- Partials

#[derive(Template)]
#[template(path = "partials/data_table.html")]
pub struct DataTableTemplate<'a> {
    pub grid: &'a Grid<Cell>,
}

pub fn render_table(grid: &Grid<Cell>) -> Result<String> {
    render(&DataTableTemplate { grid })
}

/// Pager, or its placeholder when `pager` is `None`.
#[derive(Template)]
#[template(path = "partials/pagination.html")]
pub struct PaginationTemplate<'a> {
    pub pager: Option<&'a Pagination>,
}

/// Coin header and chart, or its placeholder when `overview` is `None`.
/// An empty `periods` hides the period selector.
#[derive(Template)]
#[template(path = "partials/coin_overview.html")]
pub struct CoinOverviewTemplate<'a> {
    pub overview: Option<&'a OverviewView>,
    pub periods: Vec<PeriodLink>,
}

// endregion: --- Partials

// region:    --- Pages

/// A titled table block on the home page. `id` switches to the fallback id
/// when the skeleton is shown.
#[derive(Debug, Clone)]
pub struct Panel {
    pub id: &'static str,
    pub table: String,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub overview: String,
    pub trending: Panel,
    pub categories: Panel,
}

#[derive(Template)]
#[template(path = "coins.html")]
pub struct CoinsTemplate {
    pub page: u32,
    pub table: String,
    pub pagination: String,
}

#[derive(Template)]
#[template(path = "coin.html")]
pub struct CoinTemplate {
    pub title: String,
    pub overview: String,
}

// endregion: --- Pages
