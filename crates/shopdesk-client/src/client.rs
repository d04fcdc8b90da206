//! Backend HTTP client trait and `reqwest`-backed implementation.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use log::{debug, info};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shopdesk_core::page::{Envelope, PageResult};
use shopdesk_core::query::ListQuery;
use shopdesk_core::repair::{RepairPatch, RepairRecord, REPAIR_PATH, REPAIR_SEARCH_PATH};
use shopdesk_core::report::{PurchaseReport, REPORT_PATH};
use shopdesk_core::resource::{RecordId, Resource};
use shopdesk_core::types::RepairId;

use crate::credentials::CredentialSource;
use crate::error::ClientError;

/// Boxed future returned by dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What to fetch: a query built locally, or a cursor URL handed out by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// Build the URL from a list query.
    Query(ListQuery),
    /// Follow a `next`/`previous` cursor verbatim.
    Cursor(String),
}

/// Reads and mutates one backend collection of `R` records.
pub trait ResourceClient<R: Resource>: Send + Sync {
    /// Fetch one page and normalize it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Auth`] on 401/403, [`ClientError::MalformedResponse`]
    /// when the body is neither a list nor an envelope, and a network-kind
    /// error otherwise.
    fn fetch_page<'a>(
        &'a self,
        request: &'a PageRequest,
    ) -> BoxFuture<'a, Result<PageResult<R>, ClientError>>;

    /// Create a record and return it as stored by the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network, status or parse failure.
    fn create<'a>(&'a self, draft: &'a R::Draft) -> BoxFuture<'a, Result<R, ClientError>>;

    /// Delete the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network or status failure.
    fn delete(&self, id: RecordId) -> BoxFuture<'_, Result<(), ClientError>>;
}

impl<R: Resource, C: ResourceClient<R> + ?Sized> ResourceClient<R> for Arc<C> {
    fn fetch_page<'a>(
        &'a self,
        request: &'a PageRequest,
    ) -> BoxFuture<'a, Result<PageResult<R>, ClientError>> {
        (**self).fetch_page(request)
    }

    fn create<'a>(&'a self, draft: &'a R::Draft) -> BoxFuture<'a, Result<R, ClientError>> {
        (**self).create(draft)
    }

    fn delete(&self, id: RecordId) -> BoxFuture<'_, Result<(), ClientError>> {
        (**self).delete(id)
    }
}

/// Normalize a list response body into a [`PageResult`].
///
/// A bare array is a single page. An object with `results` is a paginated
/// envelope fetched for `requested_page`. Anything else is malformed.
///
/// # Errors
///
/// Returns [`ClientError::MalformedResponse`] for any other shape or when the
/// rows do not deserialize into `T`.
pub fn normalize<T: DeserializeOwned>(
    body: Value,
    requested_page: u32,
) -> Result<PageResult<T>, ClientError> {
    match body {
        Value::Array(_) => {
            let items: Vec<T> = serde_json::from_value(body)
                .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
            Ok(PageResult::from_bare(items))
        }
        Value::Object(ref map) if map.contains_key("results") => {
            let envelope: Envelope<T> = serde_json::from_value(body)
                .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
            Ok(PageResult::from_envelope(envelope, requested_page))
        }
        other => Err(ClientError::MalformedResponse(format!(
            "expected a list or an object with `results`, got {}",
            shape_of(&other)
        ))),
    }
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object without `results`",
    }
}

/// The `page` query parameter of `url`, defaulting to 1.
#[must_use]
pub fn page_param(url: &Url) -> u32 {
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// `reqwest`-backed implementation of [`ResourceClient`] for every resource.
#[derive(Clone)]
pub struct HttpBackend {
    base_url: Url,
    http: Arc<reqwest::Client>,
    credentials: Arc<dyn CredentialSource>,
}

impl fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpBackend {
    /// Create a client targeting `base_url`, authenticating with `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is not an absolute URL.
    pub fn new(
        base_url: &str,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self, ClientError> {
        let mut normalized = base_url.trim().to_owned();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            http: Arc::new(reqwest::Client::new()),
            credentials,
        })
    }

    /// Backend base URL, always ending with `/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn join(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl {
                url: path.to_owned(),
                reason: e.to_string(),
            })
    }

    /// Build the URL for `request` against `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the cursor or path cannot be parsed.
    pub fn url_for(&self, collection: &str, request: &PageRequest) -> Result<Url, ClientError> {
        match request {
            PageRequest::Query(query) => {
                let mut url = self.join(collection)?;
                let pairs = query.to_pairs();
                if !pairs.is_empty() {
                    url.query_pairs_mut().extend_pairs(pairs);
                }
                Ok(url)
            }
            PageRequest::Cursor(cursor) if cursor.starts_with("http") => {
                Url::parse(cursor).map_err(|e| ClientError::InvalidUrl {
                    url: cursor.clone(),
                    reason: e.to_string(),
                })
            }
            PageRequest::Cursor(cursor) => self.join(cursor),
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.credentials.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => {
                debug!("no access token available, sending request unauthenticated");
                builder
            }
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = self.authorized(builder).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::from_status(status.as_u16(), &body))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }

    /// Fetch the purchase report filtered by `query`'s search term and date range.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network, status or parse failure.
    pub async fn purchase_report(&self, query: &ListQuery) -> Result<PurchaseReport, ClientError> {
        let url = self.url_for(REPORT_PATH, &PageRequest::Query(query.clone().with_page(1)))?;
        debug!("fetching purchase report from {url}");
        let response = self.send(self.http.get(url)).await?;
        Self::read_json(response).await
    }

    /// Look up a repair by its ticket id; the first search hit is the record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network, status or parse failure.
    pub async fn find_repair(&self, id: &RepairId) -> Result<Option<RepairRecord>, ClientError> {
        let mut url = self.join(REPAIR_SEARCH_PATH)?;
        url.query_pairs_mut().append_pair("q", id.as_str());
        debug!("searching repair {id}");
        let response = self.send(self.http.get(url)).await?;
        // The search view answers "NONE" instead of an empty list.
        let body: Value = Self::read_json(response).await?;
        match body {
            Value::Array(rows) => rows
                .into_iter()
                .next()
                .map(|row| {
                    serde_json::from_value(row)
                        .map_err(|e| ClientError::MalformedResponse(e.to_string()))
                })
                .transpose(),
            Value::String(_) => Ok(None),
            other => Err(ClientError::MalformedResponse(format!(
                "expected a list of repairs, got {}",
                shape_of(&other)
            ))),
        }
    }

    /// Apply a partial update to a repair and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network, status or parse failure.
    pub async fn update_repair(&self, patch: &RepairPatch) -> Result<RepairRecord, ClientError> {
        let url = self.join(REPAIR_PATH)?;
        info!("updating repair {}", patch.repair_id());
        let response = self.send(self.http.patch(url).json(patch)).await?;
        Self::read_json(response).await
    }

    /// Delete a repair.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network or status failure.
    pub async fn delete_repair(&self, id: &RepairId) -> Result<(), ClientError> {
        let url = self.join(REPAIR_PATH)?;
        info!("deleting repair {id}");
        self.send(
            self.http
                .delete(url)
                .json(&serde_json::json!({ "repair_id": id.as_str() })),
        )
        .await?;
        Ok(())
    }
}

impl<R: Resource> ResourceClient<R> for HttpBackend {
    fn fetch_page<'a>(
        &'a self,
        request: &'a PageRequest,
    ) -> BoxFuture<'a, Result<PageResult<R>, ClientError>> {
        Box::pin(async move {
            let url = self.url_for(R::COLLECTION, request)?;
            let requested_page = page_param(&url);
            debug!("fetching {} page from {url}", R::LABEL);
            let response = self.send(self.http.get(url)).await?;
            let body: Value = Self::read_json(response).await?;
            normalize(body, requested_page)
        })
    }

    fn create<'a>(&'a self, draft: &'a R::Draft) -> BoxFuture<'a, Result<R, ClientError>> {
        Box::pin(async move {
            let url = self.join(R::COLLECTION)?;
            info!("creating {} at {url}", R::LABEL);
            let response = self.send(self.http.post(url).json(draft)).await?;
            Self::read_json(response).await
        })
    }

    fn delete(&self, id: RecordId) -> BoxFuture<'_, Result<(), ClientError>> {
        Box::pin(async move {
            let url = self.join(&R::member_path(id))?;
            info!("deleting {} {id}", R::LABEL);
            self.send(self.http.delete(url)).await?;
            Ok(())
        })
    }
}
