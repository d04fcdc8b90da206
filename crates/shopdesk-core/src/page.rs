//! One page of a remote collection, normalized from either response shape.

use serde::{Deserialize, Serialize};

/// Rows per page when the backend does not report a page count itself.
pub const PAGE_SIZE: u64 = 10;

/// Number of pages needed for `count` rows; never less than one.
#[must_use]
pub fn page_count_for(count: u64) -> u32 {
    let pages = count.div_ceil(PAGE_SIZE).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Paginated envelope as sent by the backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    /// Rows of this page.
    pub results: Vec<T>,
    /// Cursor URL of the following page.
    #[serde(default)]
    pub next: Option<String>,
    /// Cursor URL of the preceding page.
    #[serde(default)]
    pub previous: Option<String>,
    /// Total rows across all pages.
    #[serde(default)]
    pub count: Option<u64>,
    /// Page count, when the backend computes it.
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// Current page, when the backend reports it.
    #[serde(default)]
    pub page: Option<u32>,
}

/// A materialized page of rows plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    /// Rows in display order.
    pub items: Vec<T>,
    /// Cursor URL of the following page.
    pub next_cursor: Option<String>,
    /// Cursor URL of the preceding page.
    pub previous_cursor: Option<String>,
    /// Total rows across all pages.
    pub total_count: u64,
    /// Number of pages, at least 1.
    pub page_count: u32,
    /// Page shown, within `1..=page_count`.
    pub current_page: u32,
}

impl<T> PageResult<T> {
    /// Wrap a bare, unpaginated list.
    #[must_use]
    pub fn from_bare(items: Vec<T>) -> Self {
        Self {
            total_count: items.len() as u64,
            items,
            next_cursor: None,
            previous_cursor: None,
            page_count: 1,
            current_page: 1,
        }
    }

    /// Normalize an envelope fetched for `requested_page`.
    ///
    /// `total_pages` and `page` from the envelope win over the derived
    /// values; the current page is clamped into `1..=page_count` either way.
    #[must_use]
    pub fn from_envelope(envelope: Envelope<T>, requested_page: u32) -> Self {
        let total_count = envelope
            .count
            .unwrap_or(envelope.results.len() as u64);
        let page_count = envelope
            .total_pages
            .map_or_else(|| page_count_for(total_count), |p| p.max(1));
        let current_page = envelope
            .page
            .unwrap_or(requested_page)
            .clamp(1, page_count);
        Self {
            items: envelope.results,
            next_cursor: envelope.next,
            previous_cursor: envelope.previous,
            total_count,
            page_count,
            current_page,
        }
    }

    /// Whether a following page can be fetched.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Whether a preceding page can be fetched.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.previous_cursor.is_some()
    }

    /// Append a freshly created row to the displayed page.
    ///
    /// Totals are left as they are until the next fetch.
    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }

    /// Page to re-fetch after one row of this page was deleted on the server.
    ///
    /// Steps back a page when the deleted row was the only one shown, then
    /// clamps against the page count recomputed from `total_count - 1`.
    #[must_use]
    pub fn target_page_after_delete(&self) -> u32 {
        self.target_page_after_bulk_delete(1, 1)
    }

    /// Page to re-fetch after `removed` rows were deleted, `removed_shown` of
    /// them from this page.
    ///
    /// Only rows shown here can empty this page; rows from elsewhere just
    /// shrink the page count.
    #[must_use]
    pub fn target_page_after_bulk_delete(&self, removed: usize, removed_shown: usize) -> u32 {
        let remaining = self.total_count.saturating_sub(removed as u64);
        let page_count = page_count_for(remaining);
        let page = if removed_shown > 0 && removed_shown >= self.items.len() {
            self.current_page.saturating_sub(1)
        } else {
            self.current_page
        };
        page.min(page_count).max(1)
    }
}
