//! # Generic Table Renderer
//!
//! Turns a slice of records plus an ordered list of [`Column`]s into a
//! [`Grid`]: one header cell per column, one row per record, one cell per
//! (record, column) pair. The renderer is generic over the record type `T` and
//! the cell content type `R`, so every table on the dashboard (coins, trending,
//! categories, and their skeletons) goes through the same code.
//!
//! ## Rules
//!
//! - Columns keep the order they were added in; rows keep the order of the
//!   input slice. No sorting, filtering or de-duplication.
//! - Each cell function is called with `(record, row_index)`.
//! - The row key function runs exactly once per record.
//! - Keys should be unique. A collision is logged and the grid is still
//!   returned; [`Grid::duplicate_keys`] lists the offenders.
//!
//! ## Example
//!
//! ```rust
//! use lib_web::table::{Column, DataTable};
//!
//! struct Coin { id: &'static str, price: f64 }
//!
//! let coins = [Coin { id: "btc", price: 1.0 }, Coin { id: "eth", price: 2.0 }];
//! let grid = DataTable::new(|coin: &Coin, _| coin.id.to_string())
//!     .column(Column::new("Price", |coin: &Coin, _| format!("{:.2}", coin.price)))
//!     .render(&coins);
//!
//! assert_eq!(grid.row_count(), 2);
//! assert_eq!(grid.rows[1].cells[0].content, "2.00");
//! ```

mod column;
mod grid;

pub use column::Column;
pub use grid::{Grid, GridCell, HeaderCell, Row};

use grid::join_classes;
use tracing::warn;

/// Table-level style hints. Each is merged into the matching class string of
/// the rendered [`Grid`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableStyle {
    pub table: Option<String>,
    pub header: Option<String>,
    pub header_row: Option<String>,
    pub header_cell: Option<String>,
    pub body_row: Option<String>,
    pub body_cell: Option<String>,
}

impl TableStyle {
    pub fn table(mut self, class: impl Into<String>) -> Self {
        self.table = Some(class.into());
        self
    }

    pub fn header(mut self, class: impl Into<String>) -> Self {
        self.header = Some(class.into());
        self
    }

    pub fn header_row(mut self, class: impl Into<String>) -> Self {
        self.header_row = Some(class.into());
        self
    }

    pub fn header_cell(mut self, class: impl Into<String>) -> Self {
        self.header_cell = Some(class.into());
        self
    }

    pub fn body_row(mut self, class: impl Into<String>) -> Self {
        self.body_row = Some(class.into());
        self
    }

    pub fn body_cell(mut self, class: impl Into<String>) -> Self {
        self.body_cell = Some(class.into());
        self
    }
}

type KeyFn<'a, T> = Box<dyn Fn(&T, usize) -> String + 'a>;

/// Column layout and row identity for one kind of record.
pub struct DataTable<'a, T, R> {
    columns: Vec<Column<'a, T, R>>,
    row_key: KeyFn<'a, T>,
    style: TableStyle,
}

impl<'a, T, R> DataTable<'a, T, R> {
    /// Create an empty table that identifies rows with `row_key`.
    pub fn new(row_key: impl Fn(&T, usize) -> String + 'a) -> Self {
        Self {
            columns: Vec::new(),
            row_key: Box::new(row_key),
            style: TableStyle::default(),
        }
    }

    /// Append a column.
    pub fn column(mut self, column: Column<'a, T, R>) -> Self {
        self.columns.push(column);
        self
    }

    /// Append several columns in order.
    pub fn columns(mut self, columns: impl IntoIterator<Item = Column<'a, T, R>>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::header)
    }

    /// Render `records` into a grid.
    pub fn render(&self, records: &[T]) -> Grid<R> {
        let style = &self.style;

        let headers = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                label: column.header().to_string(),
                class: join_classes([style.header_cell.as_deref(), column.header_class_hint()]),
            })
            .collect();

        let row_class = join_classes([style.body_row.as_deref()]);
        let rows = records
            .iter()
            .enumerate()
            .map(|(index, record)| Row {
                key: (self.row_key)(record, index),
                class: row_class.clone(),
                cells: self
                    .columns
                    .iter()
                    .map(|column| GridCell {
                        content: column.render_cell(record, index),
                        class: join_classes([style.body_cell.as_deref(), column.cell_class_hint()]),
                    })
                    .collect(),
            })
            .collect();

        let grid = Grid {
            table_class: join_classes([style.table.as_deref()]),
            header_class: join_classes([style.header.as_deref()]),
            header_row_class: join_classes([style.header_row.as_deref()]),
            headers,
            rows,
        };

        let duplicates = grid.duplicate_keys();
        if !duplicates.is_empty() {
            warn!("Table rendered with duplicate row keys: {:?}", duplicates);
        }

        grid
    }
}
