//! # Cell Content
//!
//! What a dashboard column can put in a table cell. The data table template
//! matches on [`Cell`] to produce markup, so column definitions never touch HTML.

/// Direction of a percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// `Up` only for values strictly greater than zero. Missing counts as down.
    pub fn from_change(change: Option<f64>) -> Self {
        match change {
            Some(value) if value > 0.0 => Trend::Up,
            _ => Trend::Down,
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, Trend::Up)
    }

    /// Class used by the stylesheet to colour the value.
    pub fn class(&self) -> &'static str {
        match self {
            Trend::Up => "text-green-500",
            Trend::Down => "text-red-500",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Up => "trending up",
            Trend::Down => "trending down",
        }
    }
}

/// Renderable content of one table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// `(href, label)`
    Link(String, String),
    /// Coin image with name: `(href, image_url, label)`
    Token(String, String, String),
    /// Row of small images
    Images(Vec<String>),
    /// Percentage with its direction: `(text, trend)`
    Change(String, Trend),
    /// Percentage followed by an up/down indicator
    ChangeIcon(String, Trend),
    /// Placeholder blocks, one class per block
    Skeleton(Vec<&'static str>),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Visible text of the cell, without markup.
    pub fn plain_text(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Link(_, label) | Cell::Token(_, _, label) => label.clone(),
            Cell::Images(_) | Cell::Skeleton(_) => String::new(),
            Cell::Change(text, _) | Cell::ChangeIcon(text, _) => text.clone(),
        }
    }

    pub fn is_skeleton(&self) -> bool {
        matches!(self, Cell::Skeleton(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_is_up_only_above_zero() {
        assert_eq!(Trend::from_change(Some(0.01)), Trend::Up);
        assert_eq!(Trend::from_change(Some(0.0)), Trend::Down);
        assert_eq!(Trend::from_change(Some(-3.0)), Trend::Down);
        assert_eq!(Trend::from_change(None), Trend::Down);
        assert_eq!(Trend::from_change(Some(f64::NAN)), Trend::Down);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(Cell::text("$1.00").plain_text(), "$1.00");
        assert_eq!(
            Cell::Token("/coins/btc".into(), "img".into(), "Bitcoin".into()).plain_text(),
            "Bitcoin"
        );
        assert_eq!(Cell::Skeleton(vec!["w-8"]).plain_text(), "");
        assert_eq!(Cell::ChangeIcon("3.2%".into(), Trend::Up).plain_text(), "3.2%");
    }

    #[test]
    fn test_trend_icon_follows_direction() {
        assert_eq!(Trend::Up.icon(), "▲");
        assert_eq!(Trend::Down.icon(), "▼");
        assert_eq!(Trend::Down.label(), "trending down");
    }
}
