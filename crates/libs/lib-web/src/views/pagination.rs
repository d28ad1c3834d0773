//! # Pagination
//!
//! The markets endpoint does not report a total count, so the pager works from
//! what it can observe:
//!
//! - `has_more` is true when the page came back full (`returned == per_page`).
//! - The total page count is an estimate that stays ahead of the reader:
//!   100 below page 100, then rounded up to the next hundred plus another 100.
//!
//! ```rust
//! use lib_web::views::pagination::estimated_total_pages;
//!
//! assert_eq!(estimated_total_pages(7), 100);
//! assert_eq!(estimated_total_pages(100), 200);
//! assert_eq!(estimated_total_pages(150), 300);
//! ```

/// Coins per page on the all-coins table.
pub const PER_PAGE: u32 = 10;

/// Estimated page count used until the real end is found.
pub const DEFAULT_TOTAL_PAGES: u32 = 100;

/// Page numbers shown on each side of the current page.
const WINDOW: u32 = 1;

/// Parse the `page` query value. Anything missing, non-numeric or below 1
/// becomes page 1.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Saturates at `u32::MAX` for pages near the top of the range.
pub fn estimated_total_pages(current: u32) -> u32 {
    if current >= DEFAULT_TOTAL_PAGES {
        current
            .div_ceil(DEFAULT_TOTAL_PAGES)
            .saturating_mul(DEFAULT_TOTAL_PAGES)
            .saturating_add(DEFAULT_TOTAL_PAGES)
    } else {
        DEFAULT_TOTAL_PAGES
    }
}

pub fn has_more(returned: usize, per_page: u32) -> bool {
    returned == per_page as usize
}

/// One entry in the pager's number list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(u32),
    Current(u32),
    Ellipsis,
}

/// Pager state for one rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub per_page: u32,
    pub has_more: bool,
    pub total_pages: u32,
    pub links: Vec<PageLink>,
}

impl Pagination {
    /// Build the pager for `current` after the API returned `returned` rows.
    pub fn new(current: u32, returned: usize, per_page: u32) -> Self {
        let current = current.max(1);
        let has_more = has_more(returned, per_page);
        let total_pages = estimated_total_pages(current);
        let last = if has_more { total_pages } else { current };

        Self {
            current,
            per_page,
            has_more,
            total_pages,
            links: page_links(current, last),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn previous(&self) -> u32 {
        self.current.saturating_sub(1).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.has_more
    }

    pub fn next(&self) -> u32 {
        self.current.saturating_add(1)
    }
}

/// First page, last page, and a window around `current`, with gaps collapsed
/// into ellipses.
fn page_links(current: u32, last: u32) -> Vec<PageLink> {
    let link = |page: u32| {
        if page == current {
            PageLink::Current(page)
        } else {
            PageLink::Page(page)
        }
    };

    let last = last.max(current);
    if last <= 3 + 2 * WINDOW + 1 {
        return (1..=last).map(link).collect();
    }

    let start = current.saturating_sub(WINDOW).max(2);
    let end = current.saturating_add(WINDOW).min(last - 1);

    let mut links = vec![link(1)];
    if start > 2 {
        links.push(PageLink::Ellipsis);
    }
    links.extend((start..=end).map(link));
    if end < last - 1 {
        links.push(PageLink::Ellipsis);
    }
    links.push(link(last));

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageLink::{Current, Ellipsis, Page};

    #[test]
    fn test_parse_page_is_lenient() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-4")), 1);
        assert_eq!(parse_page(Some("2.5")), 1);
        assert_eq!(parse_page(Some(" 3 ")), 3);
        assert_eq!(parse_page(Some("42")), 42);
    }

    #[test]
    fn test_estimated_total_pages() {
        assert_eq!(estimated_total_pages(1), 100);
        assert_eq!(estimated_total_pages(99), 100);
        assert_eq!(estimated_total_pages(100), 200);
        assert_eq!(estimated_total_pages(101), 300);
        assert_eq!(estimated_total_pages(250), 400);
    }

    #[test]
    fn test_estimated_total_pages_saturates_at_max_page() {
        let page = parse_page(Some("4294967295"));

        assert_eq!(page, u32::MAX);
        assert_eq!(estimated_total_pages(page), u32::MAX);
        assert_eq!(estimated_total_pages(u32::MAX - 150), u32::MAX);
    }

    #[test]
    fn test_pager_on_max_page() {
        let pager = Pagination::new(u32::MAX, 10, PER_PAGE);

        assert_eq!(pager.total_pages, u32::MAX);
        assert_eq!(pager.next(), u32::MAX);
        assert_eq!(
            pager.links,
            vec![Page(1), Ellipsis, Page(u32::MAX - 1), Current(u32::MAX)]
        );
    }

    #[test]
    fn test_has_more_only_for_full_pages() {
        assert!(Pagination::new(1, 10, PER_PAGE).has_next());
        assert!(!Pagination::new(1, 7, PER_PAGE).has_next());
        assert!(!Pagination::new(3, 0, PER_PAGE).has_next());
    }

    #[test]
    fn test_previous_only_after_first_page() {
        let first = Pagination::new(1, 10, PER_PAGE);
        assert!(!first.has_previous());

        let third = Pagination::new(3, 10, PER_PAGE);
        assert!(third.has_previous());
        assert_eq!(third.previous(), 2);
        assert_eq!(third.next(), 4);
    }

    #[test]
    fn test_links_window_with_more_pages() {
        let pager = Pagination::new(5, 10, PER_PAGE);

        assert_eq!(
            pager.links,
            vec![Page(1), Ellipsis, Page(4), Current(5), Page(6), Ellipsis, Page(100)]
        );
    }

    #[test]
    fn test_links_near_start() {
        let pager = Pagination::new(2, 10, PER_PAGE);

        assert_eq!(pager.links, vec![Page(1), Current(2), Page(3), Ellipsis, Page(100)]);
    }

    #[test]
    fn test_links_on_last_page() {
        let pager = Pagination::new(3, 4, PER_PAGE);

        assert_eq!(pager.links, vec![Page(1), Page(2), Current(3)]);
        assert_eq!(pager.total_pages, 100);
    }

    #[test]
    fn test_links_past_estimate() {
        let pager = Pagination::new(12, 2, PER_PAGE);

        assert_eq!(
            pager.links,
            vec![Page(1), Ellipsis, Page(11), Current(12)]
        );
    }
}
