//! Immutable list query: search term, date range, page and view scope.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

/// Error returned when a list query cannot be derived.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The date range ends before it starts.
    #[error("date range ends ({end}) before it starts ({start})")]
    InvertedRange {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },
}

/// Filter criteria plus page number for one list request.
///
/// A `ListQuery` is never edited in place: every `with_*` method consumes the
/// value and returns the derived one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    search: String,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    page: u32,
    scope: Vec<(String, String)>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            start_date: None,
            end_date: None,
            page: 1,
            scope: Vec::new(),
        }
    }
}

impl ListQuery {
    /// The default query bound to fixed `scope` parameters, e.g. `category=3`.
    #[must_use]
    pub fn scoped<K, V>(scope: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            scope: scope
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Free-text search term (empty when unset).
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Inclusive lower date bound.
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Inclusive upper date bound.
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Requested page, 1-indexed.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Fixed parameters carried by every request of this view.
    #[must_use]
    pub fn scope(&self) -> &[(String, String)] {
        &self.scope
    }

    /// Whether any user-controlled filter is active.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || self.start_date.is_some() || self.end_date.is_some()
    }

    /// Derive a query with a new search term, back on page 1.
    #[must_use]
    pub fn with_search(self, term: impl Into<String>) -> Self {
        Self {
            search: term.into().trim().to_owned(),
            page: 1,
            ..self
        }
    }

    /// Derive a query with a new date range, back on page 1.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvertedRange`] when both bounds are set and
    /// `end` precedes `start`.
    pub fn with_date_range(
        self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, QueryError> {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(QueryError::InvertedRange { start, end });
            }
        }
        Ok(Self {
            start_date: start,
            end_date: end,
            page: 1,
            ..self
        })
    }

    /// Derive the same query on another page; page 0 becomes page 1.
    #[must_use]
    pub fn with_page(self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    /// Drop every user filter, keeping only the scope.
    #[must_use]
    pub fn cleared(self) -> Self {
        Self {
            scope: self.scope,
            ..Self::default()
        }
    }

    /// Query-string pairs in the order the backend expects them.
    ///
    /// The date range is only sent when both bounds are present, and `page`
    /// only past the first page.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.scope.clone();
        if !self.search.is_empty() {
            pairs.push(("search".to_owned(), self.search.clone()));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            pairs.push(("start_date".to_owned(), start.format("%Y-%m-%d").to_string()));
            pairs.push(("end_date".to_owned(), end.format("%Y-%m-%d").to_string()));
        }
        if self.page > 1 {
            pairs.push(("page".to_owned(), self.page.to_string()));
        }
        pairs
    }
}

impl fmt::Display for ListQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .to_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        f.write_str(&rendered.join("&"))
    }
}
