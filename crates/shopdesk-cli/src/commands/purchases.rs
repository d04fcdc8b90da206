//! `shopdesk purchases` — list, record, and delete purchase transactions.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use shopdesk_client::mutation::MutationCoordinator;
use shopdesk_core::page::PageResult;
use shopdesk_core::query::ListQuery;
use shopdesk_core::resource::{
    NewPurchase, NewPurchaseTransaction, Purchase, PurchaseTransaction, RecordId,
};

use super::{connect, explained, open_view, print_footer, shown, stdin_confirm, ListArgs};

/// Purchase transaction subcommands.
#[derive(Debug, Subcommand)]
pub enum PurchasesCommand {
    /// List purchase transactions
    List(ListArgs),
    /// Record a purchase transaction
    Add {
        /// Purchase date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date:  Option<NaiveDate>,
        /// Purchase line as ITEM:QTY:PRICE, e.g. 12:3:450.5; repeat for more lines
        #[arg(long = "line", required = true)]
        lines: Vec<NewPurchase>,
    },
    /// Delete a purchase transaction, then show the list again
    Delete {
        /// Transaction id
        id:   RecordId,
        /// Filters and page shown after the delete
        #[command(flatten)]
        list: ListArgs,
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes:  bool,
    },
}

/// Run a `shopdesk purchases` subcommand.
///
/// # Errors
///
/// Returns an error if the backend is unreachable, rejects the request, or
/// the user declines a delete.
pub async fn run_purchases(command: PurchasesCommand) -> Result<()> {
    let backend = connect()?;
    match command {
        PurchasesCommand::List(args) => {
            let view = open_view::<PurchaseTransaction>(backend, args.query(ListQuery::default())?)
                .await?;
            print_table(shown(&view)?);
        }
        PurchasesCommand::Add { date, lines } => {
            let draft = NewPurchaseTransaction {
                date:      date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                purchases: lines,
            };
            println!(
                "Recording {} line(s) dated {}, total {:.2}",
                draft.purchases.len(),
                draft.date,
                draft.total()
            );
            let created = MutationCoordinator::<PurchaseTransaction, _>::new(&backend)
                .create(&draft)
                .await
                .map_err(explained)
                .context("failed to record purchase")?;
            println!("Recorded purchase transaction {}", created.id);
        }
        PurchasesCommand::Delete { id, list, yes } => {
            let mut view =
                open_view::<PurchaseTransaction>(backend, list.query(ListQuery::default())?).await?;
            view.delete(id, &stdin_confirm(yes))
                .await
                .map_err(explained)?;
            println!("Deleted purchase transaction {id}");
            print_table(shown(&view)?);
        }
    }
    Ok(())
}

fn print_table(page: &PageResult<PurchaseTransaction>) {
    if page.items.is_empty() {
        println!("No purchases found.");
    }
    for tx in &page.items {
        let total = tx
            .total_amount
            .unwrap_or_else(|| tx.purchases.iter().map(Purchase::line_total).sum());
        println!(
            "{:>6}  {}  {:>10.2}  {:<20}  {} line(s)",
            tx.id,
            tx.date,
            total,
            tx.purchased_by_name.as_deref().unwrap_or("N/A"),
            tx.purchases.len()
        );
        for line in &tx.purchases {
            println!(
                "          {:<28} {:>4} x {:>9.2}",
                line.item_name.as_deref().unwrap_or("N/A"),
                line.quantity,
                line.price
            );
        }
    }
    print_footer(page);
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        command: PurchasesCommand,
    }

    #[test]
    fn command_definition_is_consistent() {
        Harness::command().debug_assert();
    }

    #[test]
    fn delete_accepts_the_list_filters() {
        let parsed =
            Harness::try_parse_from(["purchases", "delete", "7", "--search", "lcd", "--page", "2", "-y"])
                .unwrap();
        let PurchasesCommand::Delete { id, list, yes } = parsed.command else {
            panic!("expected delete");
        };
        assert_eq!(id, 7);
        assert!(yes);
        let query = list.query(ListQuery::default()).unwrap();
        assert_eq!(query.search(), "lcd");
        assert_eq!(query.page(), 2);
    }

    #[test]
    fn add_parses_purchase_lines() {
        let parsed = Harness::try_parse_from([
            "purchases", "add", "--date", "2024-05-01", "--line", "12:3:450.5", "--line", "4:1:20",
        ])
        .unwrap();
        let PurchasesCommand::Add { date, lines } = parsed.command else {
            panic!("expected add");
        };
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].quantity, 3);
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(Harness::try_parse_from(["purchases", "list", "--page", "0"]).is_err());
    }
}
