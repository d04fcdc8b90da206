//! Purchase report rows, summary totals, and CSV export.

use std::io::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Collection path of the purchase report.
pub const REPORT_PATH: &str = "inventory/purchase-report/";

/// Column headers of the exported CSV.
pub const CSV_HEADERS: [&str; 7] = [
    "Date",
    "Item Name",
    "Category",
    "Method",
    "Unit Price",
    "Quantity",
    "Total",
];

/// Body of `GET inventory/purchase-report/`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PurchaseReport {
    /// One row per purchase line.
    #[serde(default)]
    pub purchases: Vec<ReportRow>,
    /// Totals computed by the backend over the filtered rows.
    #[serde(default)]
    pub summary: Option<ReportSummary>,
}

/// A single purchase line in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Date of the owning transaction.
    pub transaction_date: NaiveDate,
    /// Purchased item.
    pub item_name: String,
    /// Category of the item, if known.
    #[serde(default)]
    pub item_category: Option<String>,
    /// Unit price.
    pub price: f64,
    /// Units bought.
    pub quantity: i64,
    /// `price * quantity`.
    pub total_cost: f64,
}

/// Backend totals for a report.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Sum of all line totals.
    pub total_amount: f64,
    /// Number of purchase lines.
    pub total_purchases: u64,
}

impl PurchaseReport {
    /// Backend summary, or totals computed from the rows when none was sent.
    #[must_use]
    pub fn totals(&self) -> ReportSummary {
        self.summary.unwrap_or_else(|| ReportSummary {
            total_amount: self.purchases.iter().map(|r| r.total_cost).sum(),
            total_purchases: self.purchases.len() as u64,
        })
    }

    /// Write the rows held by this report as CSV.
    ///
    /// Only the rows currently held are exported, never the full data set.
    ///
    /// # Errors
    ///
    /// Returns [`csv::Error`] if writing to `out` fails.
    pub fn write_csv<W: Write>(&self, out: W) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(CSV_HEADERS)?;
        for row in &self.purchases {
            writer.write_record([
                row.transaction_date.format("%Y-%m-%d").to_string(),
                row.item_name.clone(),
                row.item_category
                    .clone()
                    .unwrap_or_else(|| "N/A".to_owned()),
                "Purchase".to_owned(),
                row.price.to_string(),
                row.quantity.to_string(),
                row.total_cost.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Default export file name, e.g. `purchase-report-2024-05-01.csv`.
#[must_use]
pub fn csv_file_name(day: NaiveDate) -> String {
    format!("purchase-report-{}.csv", day.format("%Y-%m-%d"))
}
