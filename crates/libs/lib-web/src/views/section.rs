//! # Page Sections
//!
//! A page is assembled from independently fetched sections. Each one ends up
//! in one of three states, and only `Ready` carries data; the other two render
//! the section's skeleton so the page keeps its layout.

use crate::table::Grid;
use lib_core::Result;
use tracing::warn;

use super::cell::Cell;

/// Outcome of loading one page section.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Section<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Section<T> {
    /// Wrap a fetch result. Errors are logged here, once, with the section name.
    pub fn from_result(name: &str, result: Result<T>) -> Self {
        match result {
            Ok(value) => Section::Ready(value),
            Err(e) => {
                warn!("[PAGES] {} unavailable: {}", name, e);
                Section::Failed(e.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Section::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Section::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Section<U> {
        match self {
            Section::Loading => Section::Loading,
            Section::Ready(value) => Section::Ready(f(value)),
            Section::Failed(reason) => Section::Failed(reason),
        }
    }

    /// Render the data with `render`, or the skeleton when there is none.
    pub fn into_grid(
        self,
        render: impl FnOnce(T) -> Grid<Cell>,
        skeleton: impl FnOnce() -> Grid<Cell>,
    ) -> Grid<Cell> {
        match self {
            Section::Ready(value) => render(value),
            Section::Loading | Section::Failed(_) => skeleton(),
        }
    }
}
