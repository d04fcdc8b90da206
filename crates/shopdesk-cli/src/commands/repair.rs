//! `shopdesk repair` — view, edit, and delete a single repair job.

use anyhow::{anyhow, bail, Result};
use clap::Subcommand;
use serde_json::Value;
use shopdesk_core::repair::{RepairPatch, RepairRecord};
use shopdesk_core::types::{RepairId, ValidationError};

use super::{connect, explained, stdin_confirm};

fn parse_repair_id(raw: &str) -> Result<RepairId, ValidationError> {
    RepairId::new(raw)
}

/// Repair subcommands.
#[derive(Debug, Subcommand)]
pub enum RepairCommand {
    /// Show a repair's details
    Show {
        /// Repair ticket id
        #[arg(value_parser = parse_repair_id)]
        id:  RepairId,
        /// Show every field, not only the primary ones
        #[arg(long, short)]
        all: bool,
    },
    /// Change fields of a repair
    Set {
        /// Repair ticket id
        #[arg(value_parser = parse_repair_id)]
        id:      RepairId,
        /// Field assignments as KEY=VALUE; JSON values are sent as typed
        #[arg(required = true, num_args = 1..)]
        changes: Vec<String>,
    },
    /// Delete a repair
    Delete {
        /// Repair ticket id
        #[arg(value_parser = parse_repair_id)]
        id:  RepairId,
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

/// Build a patch from `KEY=VALUE` assignments.
///
/// Values that parse as JSON (numbers, booleans, `null`) keep their type;
/// anything else is sent as a string.
///
/// # Errors
///
/// Returns an error for an assignment without `=` or with an empty key, or
/// when no field would change.
pub fn build_patch(id: RepairId, changes: &[String]) -> Result<RepairPatch> {
    let mut patch = RepairPatch::new(id);
    for change in changes {
        let (key, raw) = change
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got `{change}`"))?;
        let key = key.trim();
        if key.is_empty() {
            bail!("missing field name in `{change}`");
        }
        let value = serde_json::from_str::<Value>(raw)
            .unwrap_or_else(|_| Value::String(raw.to_owned()));
        patch = patch.set(key, value);
    }
    if patch.is_empty() {
        bail!("nothing to change");
    }
    Ok(patch)
}

/// Run a `shopdesk repair` subcommand.
///
/// # Errors
///
/// Returns an error if the repair does not exist, the backend is
/// unreachable, or the user declines a delete.
pub async fn run_repair(command: RepairCommand) -> Result<()> {
    let backend = connect()?;
    match command {
        RepairCommand::Show { id, all } => {
            let Some(record) = backend.find_repair(&id).await.map_err(explained)? else {
                bail!("no repair found with id {id}");
            };
            print_record(&record, all);
        }
        RepairCommand::Set { id, changes } => {
            let patch = build_patch(id, &changes)?;
            let record = backend.update_repair(&patch).await.map_err(explained)?;
            println!("Updated repair {}", patch.repair_id());
            print_record(&record, false);
        }
        RepairCommand::Delete { id, yes } => {
            let confirm = stdin_confirm(yes);
            if !confirm("Are you sure you want to delete this repair?") {
                bail!("deletion was not confirmed");
            }
            backend.delete_repair(&id).await.map_err(explained)?;
            println!("Deleted repair {id}");
        }
    }
    Ok(())
}

fn print_record(record: &RepairRecord, all: bool) {
    for (label, value) in record.detail_rows(all) {
        println!("{label:<24} {value}");
    }
    let items = record.items();
    if !items.is_empty() {
        println!("parts used:");
        for item in items {
            println!(
                "  {:<28} x {}",
                item.item_name.unwrap_or_else(|| item.item.to_string()),
                item.quantity
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> RepairId {
        RepairId::new("R-17").unwrap()
    }

    #[test]
    fn json_values_keep_their_type() {
        let changes = vec!["due=0".to_owned(), "status=Completed".to_owned()];
        let patch = build_patch(id(), &changes).unwrap();
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "repair_id": "R-17", "due": 0, "status": "Completed" })
        );
    }

    #[test]
    fn assignments_need_an_equals_sign() {
        assert!(build_patch(id(), &["status".to_owned()]).is_err());
        assert!(build_patch(id(), &["=x".to_owned()]).is_err());
    }

    #[test]
    fn repair_id_alone_changes_nothing() {
        assert!(build_patch(id(), &["repair_id=R-18".to_owned()]).is_err());
    }
}
