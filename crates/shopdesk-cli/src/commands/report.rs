//! `shopdesk report` — purchase report with totals and CSV export.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use shopdesk_core::query::ListQuery;
use shopdesk_core::report::{csv_file_name, PurchaseReport};

use super::{connect, explained, FilterArgs};

/// Arguments of `shopdesk report`.
#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    filter: FilterArgs,
    /// Also write the rows as CSV; defaults to purchase-report-<today>.csv
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    csv:    Option<Option<PathBuf>>,
}

/// Run `shopdesk report`.
///
/// # Errors
///
/// Returns an error if the backend is unreachable, the date range is
/// inverted, or the CSV file cannot be written.
pub async fn run_report(args: ReportArgs) -> Result<()> {
    let query = args.filter.apply(ListQuery::default())?;
    let report = connect()?
        .purchase_report(&query)
        .await
        .map_err(explained)?;
    print_report(&report);

    if let Some(path) = args.csv {
        let path = path.unwrap_or_else(|| {
            PathBuf::from(csv_file_name(chrono::Local::now().date_naive()))
        });
        let file =
            File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        report
            .write_csv(file)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("exported {} report rows", report.purchases.len());
        println!("Exported to {}", path.display());
    }
    Ok(())
}

fn print_report(report: &PurchaseReport) {
    if report.purchases.is_empty() {
        println!("No purchases in this range.");
    }
    for row in &report.purchases {
        println!(
            "{}  {:<28}  {:<16}  {:>9.2} x {:<4}  {:>10.2}",
            row.transaction_date,
            row.item_name,
            row.item_category.as_deref().unwrap_or("N/A"),
            row.price,
            row.quantity,
            row.total_cost
        );
    }
    let totals = report.totals();
    println!(
        "{} purchase(s), total {:.2}",
        totals.total_purchases, totals.total_amount
    );
}
