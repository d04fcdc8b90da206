//! `shopdesk categories` and `shopdesk items` — the inventory catalogue.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use shopdesk_client::mutation::MutationCoordinator;
use shopdesk_core::page::PageResult;
use shopdesk_core::query::ListQuery;
use shopdesk_core::resource::{Category, Item, NewCategory, NewItem, RecordId};
use shopdesk_core::types::{CategoryName, ValidationError};

use super::{connect, explained, open_view, print_footer, shown, stdin_confirm};

fn parse_category_name(raw: &str) -> Result<CategoryName, ValidationError> {
    CategoryName::new(raw)
}

/// Category subcommands.
#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List categories, optionally filtered by name
    List {
        /// Case-insensitive name filter
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Add a category
    Add {
        /// Category name, at most 20 characters
        #[arg(value_parser = parse_category_name)]
        name: CategoryName,
    },
    /// Delete a category
    Delete {
        /// Category id
        id:  RecordId,
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

/// Which items to show: everything, or one category's.
#[derive(Debug, Clone, Args)]
pub struct ItemScope {
    /// Only items of this category id
    #[arg(long)]
    category: Option<RecordId>,
    /// Case-insensitive name search
    #[arg(long, short)]
    search:   Option<String>,
    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page:     u32,
}

impl ItemScope {
    /// The items query: scoped to the category when one is given.
    #[must_use]
    pub fn query(&self) -> ListQuery {
        let base = ListQuery::scoped(self.category.map(|id| ("category", id.to_string())));
        let base = match &self.search {
            Some(term) => base.with_search(term.as_str()),
            None => base,
        };
        base.with_page(self.page)
    }
}

/// Item subcommands.
#[derive(Debug, Subcommand)]
pub enum ItemsCommand {
    /// List items
    List(ItemScope),
    /// Add an item to a category
    Add {
        /// Item name
        name:     String,
        /// Default unit cost
        #[arg(long)]
        cost:     f64,
        /// Owning category id
        #[arg(long)]
        category: RecordId,
        /// Opening stock
        #[arg(long)]
        quantity: Option<i64>,
    },
    /// Delete one or more items, then show the list again
    Delete {
        /// Item ids
        #[arg(required = true, num_args = 1..)]
        ids:   Vec<RecordId>,
        /// Items list shown after the delete
        #[command(flatten)]
        scope: ItemScope,
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes:   bool,
    },
}

/// Run a `shopdesk categories` subcommand.
///
/// # Errors
///
/// Returns an error if the backend is unreachable or rejects the request.
pub async fn run_categories(command: CategoriesCommand) -> Result<()> {
    let backend = connect()?;
    match command {
        CategoriesCommand::List { search } => {
            let view = open_view::<Category>(backend, ListQuery::default()).await?;
            let page = shown(&view)?;
            let matching = matching_categories(page, search.as_deref());
            if matching.is_empty() {
                println!("No categories found.");
            }
            for category in &matching {
                println!("{:>6}  {}", category.id, category.name);
            }
            match search.as_deref() {
                Some(term) => println!("{}", search_footer(term, matching.len(), page)),
                None => print_footer(page),
            }
        }
        CategoriesCommand::Add { name } => {
            let created = MutationCoordinator::<Category, _>::new(&backend)
                .create(&NewCategory { name })
                .await
                .map_err(explained)?;
            println!("Added category {} ({})", created.name, created.id);
        }
        CategoriesCommand::Delete { id, yes } => {
            let mut view = open_view::<Category>(backend, ListQuery::default()).await?;
            view.delete(id, &stdin_confirm(yes)).await.map_err(explained)?;
            println!("Deleted category {id}");
        }
    }
    Ok(())
}

/// Run a `shopdesk items` subcommand.
///
/// # Errors
///
/// Returns an error if the backend is unreachable, rejects the request, or
/// any of the selected items could not be deleted.
pub async fn run_items(command: ItemsCommand) -> Result<()> {
    let backend = connect()?;
    match command {
        ItemsCommand::List(scope) => {
            let view = open_view::<Item>(backend, scope.query()).await?;
            print_table(shown(&view)?);
        }
        ItemsCommand::Add {
            name,
            cost,
            category,
            quantity,
        } => {
            let draft = NewItem {
                name,
                quantity,
                cost,
                category,
            };
            let created = MutationCoordinator::<Item, _>::new(&backend)
                .create(&draft)
                .await
                .map_err(explained)?;
            println!("Added item {} ({})", created.name, created.id);
        }
        ItemsCommand::Delete { ids, scope, yes } => {
            let mut view = open_view::<Item>(backend, scope.query()).await?;
            let outcome = view
                .delete_many(&ids, &stdin_confirm(yes))
                .await
                .map_err(explained)?;
            for id in &outcome.deleted {
                println!("Deleted item {id}");
            }
            print_table(shown(&view)?);
            if !outcome.failed.is_empty() {
                let ids: Vec<String> = outcome.failed.iter().map(|(id, _)| id.to_string()).collect();
                bail!("could not delete item(s) {}", ids.join(", "));
            }
        }
    }
    Ok(())
}

/// Rows of `page` whose name contains `term`; every row without a term.
fn matching_categories<'a>(page: &'a PageResult<Category>, term: Option<&str>) -> Vec<&'a Category> {
    let term = term.unwrap_or_default();
    page.items.iter().filter(|c| c.matches(term)).collect()
}

/// Footer for a locally searched category page; the backend count is unfiltered.
fn search_footer(term: &str, matches: usize, page: &PageResult<Category>) -> String {
    format!(
        "{matches} match(es) for \"{}\" among {} shown on page {} of {} ({} total, unfiltered)",
        term.trim(),
        page.items.len(),
        page.current_page,
        page.page_count,
        page.total_count
    )
}

fn print_table(page: &PageResult<Item>) {
    if page.items.is_empty() {
        println!("No items found.");
    }
    for item in &page.items {
        println!(
            "{:>6}  {:<30}  {:<20}  {:>6}  {:>10.2}",
            item.id,
            item.name,
            item.category_name.as_deref().unwrap_or("N/A"),
            item.quantity.map_or_else(|| "-".to_owned(), |q| q.to_string()),
            item.cost
        );
    }
    print_footer(page);
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[derive(Parser)]
    struct Items {
        #[command(subcommand)]
        command: ItemsCommand,
    }

    #[derive(Parser)]
    struct Categories {
        #[command(subcommand)]
        command: CategoriesCommand,
    }

    #[test]
    fn command_definitions_are_consistent() {
        Items::command().debug_assert();
        Categories::command().debug_assert();
    }

    #[test]
    fn item_delete_takes_ids_and_the_list_scope() {
        let parsed =
            Items::try_parse_from(["items", "delete", "3", "4", "--category", "2", "--page", "2"])
                .unwrap();
        let ItemsCommand::Delete { ids, scope, yes } = parsed.command else {
            panic!("expected delete");
        };
        assert_eq!(ids, vec![3, 4]);
        assert!(!yes);
        assert_eq!(scope.query().to_string(), "category=2&page=2");
    }

    #[test]
    fn category_scope_becomes_a_query_parameter() {
        let scope = ItemScope {
            category: Some(4),
            search:   Some("hdmi".to_owned()),
            page:     2,
        };
        assert_eq!(scope.query().to_string(), "category=4&search=hdmi&page=2");
    }

    #[test]
    fn unscoped_items_send_nothing() {
        let scope = ItemScope {
            category: None,
            search:   None,
            page:     1,
        };
        assert_eq!(scope.query().to_string(), "");
    }

    fn categories(names: &[&str], total_count: u64) -> PageResult<Category> {
        PageResult {
            items: names
                .iter()
                .zip(1..)
                .map(|(name, id)| Category {
                    id,
                    name: (*name).to_owned(),
                })
                .collect(),
            next_cursor: None,
            previous_cursor: None,
            total_count,
            page_count: 3,
            current_page: 1,
        }
    }

    #[test]
    fn category_search_counts_only_matches() {
        let page = categories(&["Screens", "Cables", "Screen guards"], 23);
        let matching = matching_categories(&page, Some(" screen "));
        assert_eq!(matching.len(), 2);
        assert_eq!(
            search_footer(" screen ", matching.len(), &page),
            "2 match(es) for \"screen\" among 3 shown on page 1 of 3 (23 total, unfiltered)"
        );
    }

    #[test]
    fn no_search_keeps_every_category() {
        let page = categories(&["Screens", "Cables"], 2);
        assert_eq!(matching_categories(&page, None).len(), 2);
    }

    #[test]
    fn long_category_names_are_rejected() {
        assert!(parse_category_name("a category name that is too long").is_err());
    }
}
