//! Create and delete against a collection, and the refresh that follows.

use std::marker::PhantomData;

use log::{info, warn};
use shopdesk_core::page::PageResult;
use shopdesk_core::query::ListQuery;
use shopdesk_core::resource::{RecordId, Resource};

use crate::client::ResourceClient;
use crate::error::{ClientError, DeletionError};

/// Synchronous yes/no gate in front of destructive operations.
pub trait Confirm {
    /// Ask `prompt`; `true` lets the operation proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Outcome of a batch delete.
#[derive(Debug)]
pub struct BulkDeletion {
    /// Ids the backend deleted.
    pub deleted: Vec<RecordId>,
    /// Ids that failed, with the reason.
    pub failed: Vec<(RecordId, ClientError)>,
    /// Query to re-fetch afterwards.
    pub refetch: ListQuery,
}

/// Performs mutations for one collection and decides which page to show next.
pub struct MutationCoordinator<'a, R, C: ?Sized> {
    client: &'a C,
    _resource: PhantomData<fn() -> R>,
}

impl<'a, R, C> MutationCoordinator<'a, R, C>
where
    R: Resource,
    C: ResourceClient<R> + ?Sized,
{
    /// Coordinate mutations through `client`.
    #[must_use]
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// Create a record. The caller appends it to the displayed page; totals
    /// stay stale until the next fetch.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the create request.
    pub async fn create(&self, draft: &R::Draft) -> Result<R, ClientError> {
        let record = self.client.create(draft).await?;
        info!("created {} {}", R::LABEL, record.id());
        Ok(record)
    }

    /// Delete `id` after confirmation and return the query to re-fetch.
    ///
    /// `shown` is the page currently displayed, if any; `live` the query that
    /// produced it. The returned query keeps the filters of `live` and
    /// targets the page computed by [`PageResult::target_page_after_bulk_delete`],
    /// counting `id` as shown only when it is on `shown`.
    ///
    /// # Errors
    ///
    /// Returns [`DeletionError::Declined`] without any request when the
    /// confirmation is refused, and [`DeletionError::Failed`] when the
    /// backend request fails.
    pub async fn delete(
        &self,
        id: RecordId,
        confirm: &(impl Confirm + ?Sized),
        shown: Option<&PageResult<R>>,
        live: &ListQuery,
    ) -> Result<ListQuery, ClientError> {
        let prompt = format!("Are you sure you want to delete this {}?", R::LABEL);
        if !confirm.confirm(&prompt) {
            info!("delete of {} {id} declined", R::LABEL);
            return Err(DeletionError::Declined.into());
        }
        self.client.delete(id).await.map_err(|e| DeletionError::Failed {
            label: R::LABEL,
            id: id.to_string(),
            source: Box::new(e),
        })?;
        let target = shown.map_or(live.page(), |page| {
            page.target_page_after_bulk_delete(1, shown_count(page, &[id]))
        });
        info!("deleted {} {id}, refreshing page {target}", R::LABEL);
        Ok(live.clone().with_page(target))
    }

    /// Delete several records behind a single confirmation.
    ///
    /// Each id is deleted in turn; failures are collected rather than
    /// aborting the batch. An empty batch asks nothing and deletes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DeletionError::Declined`] when the confirmation is refused.
    pub async fn delete_many(
        &self,
        ids: &[RecordId],
        confirm: &(impl Confirm + ?Sized),
        shown: Option<&PageResult<R>>,
        live: &ListQuery,
    ) -> Result<BulkDeletion, ClientError> {
        if ids.is_empty() {
            return Ok(BulkDeletion {
                deleted: Vec::new(),
                failed: Vec::new(),
                refetch: live.clone(),
            });
        }
        let prompt = format!("Delete {} selected records?", ids.len());
        if !confirm.confirm(&prompt) {
            return Err(DeletionError::Declined.into());
        }
        let mut deleted = Vec::with_capacity(ids.len());
        let mut failed = Vec::new();
        for &id in ids {
            match self.client.delete(id).await {
                Ok(()) => deleted.push(id),
                Err(e) => {
                    warn!("failed deleting {} {id}: {e}", R::LABEL);
                    failed.push((id, e));
                }
            }
        }
        let target = shown.map_or(live.page(), |page| {
            page.target_page_after_bulk_delete(deleted.len(), shown_count(page, &deleted))
        });
        Ok(BulkDeletion {
            deleted,
            failed,
            refetch: live.clone().with_page(target),
        })
    }
}

/// How many of `ids` are rows of `page`.
fn shown_count<R: Resource>(page: &PageResult<R>, ids: &[RecordId]) -> usize {
    page.items.iter().filter(|row| ids.contains(&row.id())).count()
}
