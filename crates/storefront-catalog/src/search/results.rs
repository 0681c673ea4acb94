//! Pagination over an in-memory result list.

use serde::{Deserialize, Serialize};

/// Page size on narrow viewports.
pub const NARROW_PAGE_SIZE: usize = 8;
/// Page size on wide viewports, and on region pages regardless of width.
pub const WIDE_PAGE_SIZE: usize = 16;
/// Viewport widths below this (logical pixels) are narrow.
pub const VIEWPORT_BREAKPOINT: u32 = 768;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Requested page (1-indexed, at least 1). May lie past `total_pages`.
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages, at least 1.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    ///
    /// A zero page size is treated as 1; page 0 is treated as page 1.
    /// Pages past the end are kept as requested and describe an empty slice.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page).max(1);
        let page = page.max(1);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Whether the page lies past the last page.
    pub fn is_past_end(&self) -> bool {
        self.page > self.total_pages
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let current = self.page.min(self.total_pages);
        let start = current.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Get start item number (1-indexed), 0 when the page is empty.
    pub fn start_item(&self) -> usize {
        if self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number, 0 when the page is empty.
    pub fn end_item(&self) -> usize {
        if self.offset() >= self.total {
            0
        } else {
            self.page.saturating_mul(self.per_page).min(self.total)
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, WIDE_PAGE_SIZE, 0)
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// An empty first page.
    pub fn empty(per_page: usize) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::new(1, per_page, 0),
        }
    }

    /// Total pages for the full result list.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Slice out one page.
///
/// `total_pages = ceil(len / page_size)`, at least 1. The slice bounds are
/// clamped to the list, so a page past the end is empty.
pub fn paginate<T>(items: Vec<T>, page_size: usize, page: usize) -> Page<T> {
    let pagination = Pagination::new(page, page_size, items.len());
    let items = items
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.per_page)
        .collect();
    Page { items, pagination }
}

/// Viewport width class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Narrow,
    #[default]
    Wide,
}

impl Viewport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Viewport::Narrow => "narrow",
            Viewport::Wide => "wide",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "narrow" | "mobile" => Some(Viewport::Narrow),
            "wide" | "desktop" => Some(Viewport::Wide),
            _ => None,
        }
    }
}

/// Page sizes per viewport class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizes {
    pub narrow: usize,
    pub wide: usize,
    /// Widths strictly below this are narrow.
    pub breakpoint: u32,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            narrow: NARROW_PAGE_SIZE,
            wide: WIDE_PAGE_SIZE,
            breakpoint: VIEWPORT_BREAKPOINT,
        }
    }
}

impl PageSizes {
    /// Classify a viewport width.
    pub fn classify(&self, width: u32) -> Viewport {
        if width < self.breakpoint {
            Viewport::Narrow
        } else {
            Viewport::Wide
        }
    }

    /// Page size for a viewport class.
    pub fn for_viewport(&self, viewport: Viewport) -> usize {
        match viewport {
            Viewport::Narrow => self.narrow,
            Viewport::Wide => self.wide,
        }
    }

    /// Page size for a viewport width.
    pub fn for_width(&self, width: u32) -> usize {
        self.for_viewport(self.classify(width))
    }
}
