//! Filter criteria and pagination cursors of one list view.

use chrono::NaiveDate;
use log::debug;
use shopdesk_core::page::PageResult;
use shopdesk_core::query::{ListQuery, QueryError};

use crate::client::PageRequest;

/// Holds the live [`ListQuery`] and the cursors of the last applied page.
///
/// Every operation that changes what should be displayed returns the
/// [`PageRequest`] the caller must issue next.
#[derive(Debug, Clone, Default)]
pub struct ListFilterState {
    query: ListQuery,
    next_cursor: Option<String>,
    previous_cursor: Option<String>,
}

impl ListFilterState {
    /// Start from `query`, usually [`ListQuery::default`] or a scoped query.
    #[must_use]
    pub fn new(query: ListQuery) -> Self {
        Self {
            query,
            next_cursor: None,
            previous_cursor: None,
        }
    }

    /// The live query.
    #[must_use]
    pub fn current_query(&self) -> &ListQuery {
        &self.query
    }

    /// Request for the live query as it stands.
    #[must_use]
    pub fn current_request(&self) -> PageRequest {
        PageRequest::Query(self.query.clone())
    }

    /// Replace the search term; pagination restarts at page 1.
    pub fn set_search(&mut self, term: impl Into<String>) -> PageRequest {
        self.replace(self.query.clone().with_search(term))
    }

    /// Replace the date range; pagination restarts at page 1.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvertedRange`] if `end` precedes `start`; the
    /// live query is left unchanged.
    pub fn set_date_range(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<PageRequest, QueryError> {
        let query = self.query.clone().with_date_range(start, end)?;
        Ok(self.replace(query))
    }

    /// Move to page `n`, which must be adjacent to the current page and
    /// reachable through the matching cursor. Returns `None` otherwise and
    /// leaves the state untouched.
    pub fn go_to_page(&mut self, n: u32) -> Option<PageRequest> {
        let current = self.query.page();
        let cursor = if current.checked_add(1) == Some(n) {
            self.next_cursor.clone()
        } else if n.checked_add(1) == Some(current) {
            self.previous_cursor.clone()
        } else {
            None
        };
        let Some(cursor) = cursor else {
            debug!("ignoring jump from page {current} to {n}: no cursor in that direction");
            return None;
        };
        self.query = self.query.clone().with_page(n);
        self.forget_cursors();
        Some(PageRequest::Cursor(cursor))
    }

    /// Follow the `next` cursor.
    pub fn next_page(&mut self) -> Option<PageRequest> {
        let n = self.query.page().checked_add(1)?;
        self.go_to_page(n)
    }

    /// Follow the `previous` cursor.
    pub fn previous_page(&mut self) -> Option<PageRequest> {
        let n = self.query.page().checked_sub(1)?;
        self.go_to_page(n)
    }

    /// Restore the default query, keeping the view's scope, and return the
    /// request for the unfiltered first page.
    pub fn clear(&mut self) -> PageRequest {
        self.replace(self.query.clone().cleared())
    }

    /// Keep the filters but land on `page`; used to refresh after a delete.
    pub fn land_on(&mut self, page: u32) -> PageRequest {
        self.replace(self.query.clone().with_page(page))
    }

    /// Record the cursors and page of a result that was just applied.
    pub fn observe<T>(&mut self, result: &PageResult<T>) {
        self.next_cursor.clone_from(&result.next_cursor);
        self.previous_cursor.clone_from(&result.previous_cursor);
        self.query = self.query.clone().with_page(result.current_page);
    }

    /// Whether a `next` cursor is known.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Whether a `previous` cursor is known.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.previous_cursor.is_some()
    }

    fn replace(&mut self, query: ListQuery) -> PageRequest {
        self.query = query;
        self.forget_cursors();
        self.current_request()
    }

    fn forget_cursors(&mut self) {
        self.next_cursor = None;
        self.previous_cursor = None;
    }
}
