//! Pagination over filtered results.

use serde::{Deserialize, Serialize};

/// Products shown per catalog page.
pub const PAGE_SIZE: usize = 10;

/// Number of page buttons in the pagination window.
const PAGE_WINDOW: usize = 5;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages; 0 when there are no items.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info. A `per_page` of 0 is treated as 1.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1 && total_pages > 0,
        }
    }

    /// Index of the first item on this page, if the page is in range.
    pub fn offset(&self) -> Option<usize> {
        if self.page == 0 || self.page > self.total_pages {
            None
        } else {
            Some((self.page - 1) * self.per_page)
        }
    }

    /// Page buttons to show: up to five pages starting two before the current one.
    pub fn page_numbers(&self) -> Vec<usize> {
        if self.total_pages == 0 {
            return Vec::new();
        }
        let start = self.page.saturating_sub(2).max(1);
        let end = (start + PAGE_WINDOW - 1).min(self.total_pages);
        (start..=end).collect()
    }

    /// Target of the "previous" button; stays on page 1.
    pub fn prev_page(&self) -> usize {
        self.page.saturating_sub(1).max(1)
    }

    /// Target of the "next" button; stays on the last page.
    pub fn next_page(&self) -> usize {
        (self.page + 1).min(self.total_pages.max(1))
    }

    /// Whether pagination controls are shown at all.
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    /// Clamp a requested page into the valid range (page 1 when empty).
    pub fn clamp_page(&self, requested: usize) -> usize {
        requested.clamp(1, self.total_pages.max(1))
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice out page `page` (1-indexed). Page 0 or a page past the end yields
/// an empty item list.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let pagination = Pagination::new(page, per_page, items.len());
    let page_items = match pagination.offset() {
        Some(start) => {
            let end = (start + pagination.per_page).min(items.len());
            items[start..end].to_vec()
        }
        None => Vec::new(),
    };

    Page {
        items: page_items,
        pagination,
    }
}

/// Results counter text.
pub fn results_label(count: usize) -> String {
    if count == 1 {
        "1 produto encontrado".to_string()
    } else {
        format!("{} produtos encontrados", count)
    }
}
