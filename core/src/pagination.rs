//! Pagination math shared by the list hooks and the list views.
//!
//! `PaginationParams` is what goes on the wire; `Pagination` is the pure
//! control computed from what the view knows. The control never clamps the
//! current page: the owner of that state decides what to do when it falls
//! outside the computed range.

use serde::{Deserialize, Serialize};

/// Maximum number of page numbers `Pagination::pages` returns.
pub const VISIBLE_PAGES: u32 = 5;

/// Offset/limit pair sent to list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationParams {
    pub skip: u32,
    pub limit: u32,
}

impl PaginationParams {
    /// Parameters for the 1-based `page` at `page_size` items per page.
    /// Page 0 is treated as page 1.
    pub fn for_page(page: u32, page_size: u32) -> Self {
        Self {
            skip: page.saturating_sub(1).saturating_mul(page_size),
            limit: page_size,
        }
    }
}

/// A navigation request from a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    First,
    Previous,
    Next,
    Last,
    Page(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: u32,
    total_items: u64,
    items_per_page: u32,
}

impl Pagination {
    pub fn new(current_page: u32, total_items: u64, items_per_page: u32) -> Self {
        Self {
            current_page,
            total_items,
            items_per_page,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// `ceil(total_items / items_per_page)`, never less than 1.
    pub fn total_pages(&self) -> u32 {
        if self.items_per_page == 0 {
            return 1;
        }
        let pages = self.total_items.div_ceil(u64::from(self.items_per_page));
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    /// True when the current page lies outside `[1, total_pages]`, e.g.
    /// after the page size grew while a high page was selected.
    pub fn is_out_of_range(&self) -> bool {
        self.current_page < 1 || self.current_page > self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Up to `VISIBLE_PAGES` consecutive page numbers, centred on the current
    /// page where the range allows.
    pub fn pages(&self) -> Vec<u32> {
        let total = self.total_pages();
        let width = VISIBLE_PAGES.min(total);
        let centre = self.current_page.clamp(1, total);
        let start = centre
            .saturating_sub(width / 2)
            .max(1)
            .min(total - width + 1);
        (start..=start + (width - 1)).collect()
    }

    /// The page a navigation request leads to, or `None` when that control
    /// is disabled at the current boundary.
    pub fn target(&self, nav: PageNav) -> Option<u32> {
        let total = self.total_pages();
        match nav {
            PageNav::First => self.has_previous().then_some(1),
            PageNav::Previous => self.has_previous().then(|| self.current_page - 1),
            PageNav::Next => self.has_next().then(|| self.current_page + 1),
            PageNav::Last => self.has_next().then_some(total),
            PageNav::Page(page) => (1..=total).contains(&page).then_some(page),
        }
    }
}
