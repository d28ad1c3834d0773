//! # Views
//!
//! Everything between fetched DTOs and HTML:
//!
//! - [`cell`] - What a table cell can display
//! - [`columns`] - Coins, trending and categories tables plus their skeletons
//! - [`section`] - Loading / ready / failed state of a page section
//! - [`pagination`] - Page parsing, page-count estimate and pager links
//! - [`overview`] - Coin header and chart payload
//! - [`templates`] - askama templates

pub mod cell;
pub mod columns;
pub mod overview;
pub mod pagination;
pub mod section;
pub mod templates;

pub use cell::{Cell, Trend};
pub use overview::{period_links, OverviewView, PeriodLink};
pub use pagination::{parse_page, Pagination, PER_PAGE};
pub use section::Section;
