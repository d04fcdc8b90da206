//! Shared plumbing for the subcommands: connecting, confirming, and list output.

pub mod inventory;
pub mod login;
pub mod purchases;
pub mod repair;
pub mod report;

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;
use shopdesk_client::client::{HttpBackend, ResourceClient};
use shopdesk_client::credentials::StaticToken;
use shopdesk_client::error::{ClientError, ErrorKind};
use shopdesk_client::view::{ListView, ViewState};
use shopdesk_core::page::PageResult;
use shopdesk_core::query::ListQuery;
use shopdesk_core::resource::Resource;

use crate::config::{default_config_path, resolve_config};

/// Search term and date range shared by the list-style commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Free-text search
    #[arg(long, short)]
    pub search: Option<String>,
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    /// Apply these filters on top of `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if `--to` precedes `--from`.
    pub fn apply(&self, base: ListQuery) -> Result<ListQuery> {
        let query = match &self.search {
            Some(term) => base.with_search(term.as_str()),
            None => base,
        };
        Ok(query.with_date_range(self.from, self.to)?)
    }
}

/// Filters plus the page to show.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[command(flatten)]
    filter: FilterArgs,
    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

impl ListArgs {
    /// The query these arguments describe, on top of `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the date range is inverted.
    pub fn query(&self, base: ListQuery) -> Result<ListQuery> {
        Ok(self.filter.apply(base)?.with_page(self.page))
    }
}

/// Build a backend client from `~/.shopdesk/config.toml` and the environment.
///
/// # Errors
///
/// Returns an error if the config file is unreadable or the URL is invalid.
pub fn connect() -> Result<HttpBackend> {
    let cfg = resolve_config(&default_config_path())?;
    log::debug!("using backend {}", cfg.backend_url);
    HttpBackend::new(&cfg.backend_url, Arc::new(StaticToken::new(cfg.access_token)))
        .context("invalid backend URL in configuration")
}

/// Confirmation that asks on stdin, or always agrees when `assume_yes` is set.
#[must_use]
pub fn stdin_confirm(assume_yes: bool) -> impl Fn(&str) -> bool {
    move |prompt: &str| {
        assume_yes
            || ask(prompt).unwrap_or_else(|e| {
                log::warn!("could not read confirmation: {e}");
                false
            })
    }
}

fn ask(prompt: &str) -> std::io::Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Turn a client error into a message the user can act on.
#[must_use]
pub fn explain(err: &ClientError) -> String {
    match err.kind() {
        ErrorKind::Auth => format!("{err}; run `shopdesk login <token>` first"),
        ErrorKind::Network => format!("could not reach the backend: {err}"),
        ErrorKind::MalformedResponse => format!("the backend sent something unexpected: {err}"),
        ErrorKind::Deletion => err.to_string(),
    }
}

/// Wrap a client error with [`explain`]'s message, keeping it as the cause.
#[must_use]
pub fn explained(err: ClientError) -> anyhow::Error {
    let message = explain(&err);
    anyhow::Error::new(err).context(message)
}

/// Open a list view on `query` and load it.
///
/// # Errors
///
/// Returns the fetch error, explained.
pub async fn open_view<R>(backend: HttpBackend, query: ListQuery) -> Result<ListView<R, HttpBackend>>
where
    R: Resource + Clone,
{
    let mut view = ListView::with_query(backend, query);
    view.load().await;
    shown(&view)?;
    Ok(view)
}

/// The page a view is showing.
///
/// # Errors
///
/// Returns an error if the last fetch failed.
pub fn shown<R, C>(view: &ListView<R, C>) -> Result<&PageResult<R>>
where
    R: Resource + Clone,
    C: ResourceClient<R>,
{
    match view.state() {
        ViewState::Ready(page) => Ok(page),
        ViewState::Failed(err) => bail!("{}", explain(err)),
        ViewState::Idle | ViewState::Loading => bail!("no {} list loaded", R::LABEL),
    }
}

/// Print the pagination line under a table.
pub fn print_footer<T>(page: &PageResult<T>) {
    println!(
        "page {} of {} ({} total)",
        page.current_page, page.page_count, page.total_count
    );
}
