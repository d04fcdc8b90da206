//! The list view state machine: `Idle → Loading → (Ready | Failed)`.
//!
//! A view owns its filter state and the page it displays. Each fetch is
//! tagged with a generation number; only the response to the most recently
//! issued request is applied, so a slow reply can never overwrite a newer
//! one.

use chrono::NaiveDate;
use log::{debug, warn};
use shopdesk_core::page::PageResult;
use shopdesk_core::query::{ListQuery, QueryError};
use shopdesk_core::resource::{RecordId, Resource};

use crate::client::{PageRequest, ResourceClient};
use crate::error::ClientError;
use crate::filter::ListFilterState;
use crate::mutation::{BulkDeletion, Confirm, MutationCoordinator};

/// What a list view currently shows.
#[derive(Debug, Default)]
pub enum ViewState<R> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last successful page.
    Ready(PageResult<R>),
    /// The last error; replaces the list content.
    Failed(ClientError),
}

impl<R> ViewState<R> {
    /// The displayed page, when ready.
    #[must_use]
    pub fn page(&self) -> Option<&PageResult<R>> {
        match self {
            Self::Ready(page) => Some(page),
            _ => None,
        }
    }

    /// The last error, when failed.
    #[must_use]
    pub fn error(&self) -> Option<&ClientError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Handle for one issued fetch; pass it back to [`ListView::apply`].
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    request: PageRequest,
}

impl Ticket {
    /// The request this ticket was issued for.
    #[must_use]
    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    /// Generation number; higher means issued later.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// One list view over a collection of `R` records.
pub struct ListView<R, C> {
    client: C,
    filter: ListFilterState,
    state: ViewState<R>,
    issued: u64,
    last_request: Option<PageRequest>,
}

impl<R, C> ListView<R, C>
where
    R: Resource + Clone,
    C: ResourceClient<R>,
{
    /// An idle view with the default query.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self::with_query(client, ListQuery::default())
    }

    /// An idle view starting from `query`, e.g. one scoped to a category.
    #[must_use]
    pub fn with_query(client: C, query: ListQuery) -> Self {
        Self {
            client,
            filter: ListFilterState::new(query),
            state: ViewState::Idle,
            issued: 0,
            last_request: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &ViewState<R> {
        &self.state
    }

    /// Filter criteria and cursors.
    #[must_use]
    pub fn filter(&self) -> &ListFilterState {
        &self.filter
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Mark `request` as the live one and enter `Loading`.
    pub fn begin(&mut self, request: PageRequest) -> Ticket {
        self.issued += 1;
        self.state = ViewState::Loading;
        self.last_request = Some(request.clone());
        Ticket {
            generation: self.issued,
            request,
        }
    }

    /// Install the outcome of `ticket`'s fetch. Returns `false` and changes
    /// nothing when a newer request has been issued since.
    pub fn apply(&mut self, ticket: Ticket, result: Result<PageResult<R>, ClientError>) -> bool {
        if ticket.generation != self.issued {
            debug!(
                "discarding response of generation {} (latest is {})",
                ticket.generation, self.issued
            );
            return false;
        }
        match result {
            Ok(page) => {
                self.filter.observe(&page);
                self.state = ViewState::Ready(page);
            }
            Err(e) => {
                warn!("{} list fetch failed: {e}", R::LABEL);
                self.state = ViewState::Failed(e);
            }
        }
        true
    }

    async fn run(&mut self, request: PageRequest) {
        let ticket = self.begin(request);
        let result = self.client.fetch_page(ticket.request()).await;
        self.apply(ticket, result);
    }

    /// Fetch the live query, e.g. on first display.
    pub async fn load(&mut self) {
        let request = self.filter.current_request();
        self.run(request).await;
    }

    /// Re-issue the last request, or the live query if nothing was issued.
    pub async fn retry(&mut self) {
        let request = self
            .last_request
            .clone()
            .unwrap_or_else(|| self.filter.current_request());
        self.run(request).await;
    }

    /// Search for `term` from page 1.
    pub async fn search(&mut self, term: impl Into<String>) {
        let request = self.filter.set_search(term);
        self.run(request).await;
    }

    /// Filter by date range from page 1.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] for an inverted range; nothing is fetched then.
    pub async fn filter_dates(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<(), QueryError> {
        let request = self.filter.set_date_range(start, end)?;
        self.run(request).await;
        Ok(())
    }

    /// Drop all filters and fetch the first page.
    pub async fn clear(&mut self) {
        let request = self.filter.clear();
        self.run(request).await;
    }

    /// Follow the `next` cursor. Returns `false` when there is none.
    pub async fn next_page(&mut self) -> bool {
        match self.filter.next_page() {
            Some(request) => {
                self.run(request).await;
                true
            }
            None => false,
        }
    }

    /// Follow the `previous` cursor. Returns `false` when there is none.
    pub async fn previous_page(&mut self) -> bool {
        match self.filter.previous_page() {
            Some(request) => {
                self.run(request).await;
                true
            }
            None => false,
        }
    }

    /// Jump to an adjacent page. Returns `false` when it is not reachable
    /// through a known cursor.
    pub async fn go_to_page(&mut self, n: u32) -> bool {
        match self.filter.go_to_page(n) {
            Some(request) => {
                self.run(request).await;
                true
            }
            None => false,
        }
    }

    /// Create a record and append it to the displayed page.
    ///
    /// `total_count` and `page_count` are left untouched until the next fetch.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the create request; the view is unchanged.
    pub async fn create(&mut self, draft: &R::Draft) -> Result<R, ClientError> {
        let record = MutationCoordinator::<R, C>::new(&self.client).create(draft).await?;
        if let ViewState::Ready(page) = &mut self.state {
            page.append(record.clone());
        }
        Ok(record)
    }

    /// Delete `id` after confirmation, then re-fetch the page computed from
    /// the displayed one.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Deletion`] when declined (no request is made)
    /// or when the delete fails; the view is unchanged in both cases.
    pub async fn delete(
        &mut self,
        id: RecordId,
        confirm: &(impl Confirm + ?Sized),
    ) -> Result<(), ClientError> {
        let live = self.filter.current_query().clone();
        let refetch = MutationCoordinator::<R, C>::new(&self.client)
            .delete(id, confirm, self.state.page(), &live)
            .await?;
        let request = self.filter.land_on(refetch.page());
        self.run(request).await;
        Ok(())
    }

    /// Delete several records behind one confirmation, then re-fetch once.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Deletion`] when declined.
    pub async fn delete_many(
        &mut self,
        ids: &[RecordId],
        confirm: &(impl Confirm + ?Sized),
    ) -> Result<BulkDeletion, ClientError> {
        if ids.is_empty() {
            return Ok(BulkDeletion {
                deleted: Vec::new(),
                failed: Vec::new(),
                refetch: self.filter.current_query().clone(),
            });
        }
        let live = self.filter.current_query().clone();
        let outcome = MutationCoordinator::<R, C>::new(&self.client)
            .delete_many(ids, confirm, self.state.page(), &live)
            .await?;
        let request = self.filter.land_on(outcome.refetch.page());
        self.run(request).await;
        Ok(outcome)
    }
}
