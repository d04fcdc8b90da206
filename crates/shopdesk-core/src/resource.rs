//! Backend collections and the records they hold.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryName, ValidationError};

/// Primary key assigned by the backend.
pub type RecordId = i64;

/// A record type served from one REST collection.
///
/// The collection path is relative to the backend base URL and ends with a
/// slash; single records live at `<collection><id>/`.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Collection path, e.g. `inventory/category/`.
    const COLLECTION: &'static str;

    /// Human-readable singular name used in prompts and logs.
    const LABEL: &'static str;

    /// Request body used to create a new record.
    type Draft: Serialize + Send + Sync;

    /// Backend primary key of this record.
    fn id(&self) -> RecordId;

    /// Path of a single record.
    #[must_use]
    fn member_path(id: RecordId) -> String {
        format!("{}{id}/", Self::COLLECTION)
    }
}

/// A purchase transaction: one vendor visit with one or more purchase lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseTransaction {
    /// Backend id.
    pub id: RecordId,
    /// Day the purchase was recorded.
    pub date: NaiveDate,
    /// Sum of all lines, computed by the backend.
    #[serde(default)]
    pub total_amount: Option<f64>,
    /// Person who made the purchase.
    #[serde(default)]
    pub purchased_by: Option<RecordId>,
    /// Display name of the purchaser.
    #[serde(default)]
    pub purchased_by_name: Option<String>,
    /// Individual purchase lines.
    #[serde(default)]
    pub purchases: Vec<Purchase>,
}

impl Resource for PurchaseTransaction {
    const COLLECTION: &'static str = "inventory/purchasetransaction/";
    const LABEL: &'static str = "purchase transaction";
    type Draft = NewPurchaseTransaction;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// One line of a purchase transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    /// Backend id of the line.
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Purchased inventory item.
    pub item: RecordId,
    /// Display name of the item.
    #[serde(default)]
    pub item_name: Option<String>,
    /// Units bought.
    pub quantity: i64,
    /// Unit price.
    pub price: f64,
}

impl Purchase {
    /// Line total, `price * quantity`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Body of `POST inventory/purchasetransaction/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPurchaseTransaction {
    /// Purchase date.
    pub date: NaiveDate,
    /// Purchase lines; the backend adds each quantity to the item's stock.
    pub purchases: Vec<NewPurchase>,
}

impl NewPurchaseTransaction {
    /// Sum of all line totals, as the entry form shows it before submitting.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.purchases.iter().map(NewPurchase::line_total).sum()
    }
}

/// One line of a new purchase transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPurchase {
    /// Inventory item id.
    pub item: RecordId,
    /// Unit price.
    pub price: f64,
    /// Units bought.
    pub quantity: i64,
}

impl NewPurchase {
    /// Line total, `price * quantity`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

impl FromStr for NewPurchase {
    type Err = ValidationError;

    /// Parse `item:quantity:price`, e.g. `12:3:450.5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':').map(str::trim);
        let (Some(item), Some(quantity), Some(price), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ValidationError::MalformedLine(s.to_owned()));
        };
        let invalid = |field: &'static str, value: &str| ValidationError::InvalidNumber {
            field,
            value: value.to_owned(),
        };
        let item: RecordId = item.parse().map_err(|_| invalid("item", item))?;
        let quantity = quantity
            .parse::<i64>()
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| invalid("quantity", quantity))?;
        let price = price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| invalid("price", price))?;
        Ok(Self {
            item,
            price,
            quantity,
        })
    }
}

/// An inventory category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Backend id.
    pub id: RecordId,
    /// Category name.
    pub name: String,
}

impl Category {
    /// Case-insensitive substring match on the name.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.trim().to_lowercase())
    }
}

impl Resource for Category {
    const COLLECTION: &'static str = "inventory/category/";
    const LABEL: &'static str = "category";
    type Draft = NewCategory;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Body of `POST inventory/category/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCategory {
    /// Validated category name.
    pub name: CategoryName,
}

/// An inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Backend id.
    pub id: RecordId,
    /// Item name.
    pub name: String,
    /// Units in stock; unset until the first purchase.
    #[serde(default)]
    pub quantity: Option<i64>,
    /// Default unit cost.
    pub cost: f64,
    /// Owning category id.
    pub category: RecordId,
    /// Owning category name.
    #[serde(default)]
    pub category_name: Option<String>,
}

impl Resource for Item {
    const COLLECTION: &'static str = "inventory/item/";
    const LABEL: &'static str = "item";
    type Draft = NewItem;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Body of `POST inventory/item/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewItem {
    /// Item name.
    pub name: String,
    /// Opening stock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// Default unit cost.
    pub cost: f64,
    /// Owning category id.
    pub category: RecordId,
}
