//! # Column Definitions
//!
//! A [`Column`] pairs a header label with a cell function. The cell function
//! receives the record and its position in the input slice and returns
//! whatever content type the table renders (`R`).

use std::fmt;

type CellFn<'a, T, R> = Box<dyn Fn(&T, usize) -> R + 'a>;

/// One column of a [`DataTable`](super::DataTable).
pub struct Column<'a, T, R> {
    header: String,
    cell: CellFn<'a, T, R>,
    header_class: Option<String>,
    cell_class: Option<String>,
}

impl<'a, T, R> Column<'a, T, R> {
    /// Create a column with a header label and a cell function.
    ///
    /// ```rust
    /// use lib_web::table::Column;
    ///
    /// let rank: Column<'_, (u32, &str), String> =
    ///     Column::new("Rank", |(rank, _), _| format!("#{}", rank));
    /// assert_eq!(rank.header(), "Rank");
    /// ```
    pub fn new(header: impl Into<String>, cell: impl Fn(&T, usize) -> R + 'a) -> Self {
        Self {
            header: header.into(),
            cell: Box::new(cell),
            header_class: None,
            cell_class: None,
        }
    }

    /// Style hint for this column's header cell.
    pub fn header_class(mut self, class: impl Into<String>) -> Self {
        self.header_class = Some(class.into());
        self
    }

    /// Style hint for every body cell in this column.
    pub fn cell_class(mut self, class: impl Into<String>) -> Self {
        self.cell_class = Some(class.into());
        self
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub(crate) fn header_class_hint(&self) -> Option<&str> {
        self.header_class.as_deref()
    }

    pub(crate) fn cell_class_hint(&self) -> Option<&str> {
        self.cell_class.as_deref()
    }

    pub(crate) fn render_cell(&self, record: &T, index: usize) -> R {
        (self.cell)(record, index)
    }
}

impl<T, R> fmt::Debug for Column<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("header_class", &self.header_class)
            .field("cell_class", &self.cell_class)
            .finish_non_exhaustive()
    }
}
