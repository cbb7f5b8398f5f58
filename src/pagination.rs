// 📄 Paginator - permissive page/page-size normalization
//
// Paging input is never rejected: absent, non-numeric, zero or negative
// values are clamped into range.

use serde::Serialize;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Clamp already-numeric input: page >= 1, page size in 1..=100
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page.map_or(DEFAULT_PAGE, |p| p.max(1) as u64);
        let page_size = page_size.map_or(DEFAULT_PAGE_SIZE, |s| {
            s.clamp(1, MAX_PAGE_SIZE as i64) as u64
        });

        PageRequest { page, page_size }
    }

    /// Normalize raw query-string values; unparseable input falls back to defaults
    pub fn from_raw(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self::new(page.and_then(parse_int), page_size.and_then(parse_int))
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }

    /// ceil(total / page_size), 0 when there is nothing to page
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
