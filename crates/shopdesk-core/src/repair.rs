//! Repair job records as shown on the repair detail page.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::RepairId;

/// Search endpoint; `?q=<repair id>` returns matching repairs.
pub const REPAIR_SEARCH_PATH: &str = "repair/search/";

/// Repair collection; `PATCH` and `DELETE` take the repair id in the body.
pub const REPAIR_PATH: &str = "repair/";

/// Fields shown before "show more" is requested.
pub const PRIMARY_FIELDS: [&str; 8] = [
    "customer_name",
    "customer_phone_number",
    "phone_model",
    "repair_problem",
    "total_amount",
    "advance_paid",
    "due",
    "amount_paid",
];

/// Every field of the detail view, in display order.
pub const ALL_FIELDS: [&str; 33] = [
    "customer_name",
    "customer_phone_number",
    "phone_model",
    "repair_problem",
    "total_amount",
    "due",
    "amount_paid",
    "sim_tray",
    "sim",
    "SD_card",
    "phone_cover",
    "repair_id",
    "repair_description",
    "imei_number",
    "model_number",
    "phone_condition",
    "received_date",
    "received_by",
    "outside_repair",
    "delivery_date",
    "repair_status",
    "repair_cost_price",
    "cost_price_description",
    "repair_profit",
    "technician_profit",
    "my_profit",
    "admin_only_profit",
    "outside_name",
    "outside_desc",
    "taken_by",
    "outside_cost",
    "repaired_by",
    "updated_at",
];

/// A part consumed by a repair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairItem {
    /// Inventory item id.
    pub item: i64,
    /// Units used.
    pub quantity: i64,
    /// Item display name.
    #[serde(default)]
    pub item_name: Option<String>,
}

/// A repair job. The field set differs by the caller's role, so the record
/// keeps the raw JSON object and exposes typed accessors for the fields
/// the client relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepairRecord(Map<String, Value>);

impl RepairRecord {
    /// Wrap a raw JSON object.
    #[must_use]
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Ticket id of this repair.
    #[must_use]
    pub fn repair_id(&self) -> Option<String> {
        match self.0.get("repair_id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Raw value of one field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Parts used by this repair.
    #[must_use]
    pub fn items(&self) -> Vec<RepairItem> {
        self.0
            .get("repair_items")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    /// Label/value pairs for display: the primary fields, then the rest
    /// when `show_all` is set. Missing values render as `N/A`.
    #[must_use]
    pub fn detail_rows(&self, show_all: bool) -> Vec<(String, String)> {
        let rest = ALL_FIELDS
            .iter()
            .filter(|key| !PRIMARY_FIELDS.contains(*key));
        let keys: Vec<&str> = if show_all {
            PRIMARY_FIELDS.iter().chain(rest).copied().collect()
        } else {
            PRIMARY_FIELDS.to_vec()
        };
        keys.into_iter()
            .map(|key| (key.replace('_', " "), self.display_value(key)))
            .collect()
    }

    fn display_value(&self, key: &str) -> String {
        // `repaired_by` is an id; the name travels alongside it.
        let key = if key == "repaired_by" {
            "repaired_by_name"
        } else {
            key
        };
        match self.0.get(key) {
            None | Some(Value::Null) => "N/A".to_owned(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Body of `PATCH repair/`: the repair id plus the changed fields only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepairPatch {
    repair_id: RepairId,
    #[serde(flatten)]
    changes: Map<String, Value>,
}

impl RepairPatch {
    /// Start an empty patch for `repair_id`.
    #[must_use]
    pub fn new(repair_id: RepairId) -> Self {
        Self {
            repair_id,
            changes: Map::new(),
        }
    }

    /// Set one field; `repair_id` itself cannot be changed.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != "repair_id" {
            self.changes.insert(key, value.into());
        }
        self
    }

    /// Whether any field was changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Repair this patch applies to.
    #[must_use]
    pub fn repair_id(&self) -> &RepairId {
        &self.repair_id
    }
}
