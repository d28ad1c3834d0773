//! # Rendered Grid
//!
//! Output of [`DataTable::render`](super::DataTable::render): header labels and
//! rows of cells, with every style hint already resolved to a class string.
//! The HTML template walks this structure; nothing in here knows about HTML.

use std::collections::HashSet;

/// Header cell with its resolved class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: String,
    pub class: String,
}

/// Body cell with its resolved class.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell<R> {
    pub content: R,
    pub class: String,
}

/// Body row. `key` identifies the row across renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<R> {
    pub key: String,
    pub class: String,
    pub cells: Vec<GridCell<R>>,
}

/// A rendered table.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<R> {
    pub table_class: String,
    pub header_class: String,
    pub header_row_class: String,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Row<R>>,
}

impl<R> Grid<R> {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.key.as_str())
    }

    /// Keys that appear on more than one row, in first-repeat order.
    pub fn duplicate_keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();

        self.keys()
            .filter(|key| !seen.insert(*key) && reported.insert(*key))
            .collect()
    }

    /// Header labels in column order.
    pub fn header_labels(&self) -> Vec<&str> {
        self.headers.iter().map(|header| header.label.as_str()).collect()
    }
}

/// Join non-empty class fragments with a single space.
pub(crate) fn join_classes<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_keys(keys: &[&str]) -> Grid<()> {
        Grid {
            table_class: String::new(),
            header_class: String::new(),
            header_row_class: String::new(),
            headers: Vec::new(),
            rows: keys
                .iter()
                .map(|key| Row {
                    key: key.to_string(),
                    class: String::new(),
                    cells: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_duplicate_keys_reported_once() {
        let grid = grid_with_keys(&["a", "b", "a", "c", "a", "b"]);

        assert_eq!(grid.duplicate_keys(), vec!["a", "b"]);
    }

    #[test]
    fn test_unique_keys() {
        let grid = grid_with_keys(&["bitcoin", "ethereum"]);

        assert!(grid.duplicate_keys().is_empty());
        assert_eq!(grid.keys().collect::<Vec<_>>(), vec!["bitcoin", "ethereum"]);
    }

    #[test]
    fn test_join_classes_skips_blank() {
        assert_eq!(join_classes([Some("a"), None, Some("  "), Some(" b ")]), "a b");
        assert_eq!(join_classes([None, None]), "");
    }
}
