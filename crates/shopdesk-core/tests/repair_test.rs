use serde_json::json;
use shopdesk_core::repair::{RepairPatch, RepairRecord};
use shopdesk_core::types::RepairId;

fn record() -> RepairRecord {
    serde_json::from_value(json!({
        "repair_id": "R-17",
        "customer_name": "Hari",
        "phone_model": "A52",
        "total_amount": 3000,
        "due": null,
        "repaired_by": 4,
        "repaired_by_name": "Ram",
        "repair_items": [{"item": 2, "quantity": 1, "item_name": "LCD"}]
    }))
    .unwrap()
}

#[test]
fn primary_rows_only_by_default() {
    let rows = record().detail_rows(false);
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0], ("customer name".to_owned(), "Hari".to_owned()));
    assert_eq!(rows[1].1, "N/A");
    assert_eq!(rows[4].1, "3000");
    assert_eq!(rows[6].1, "N/A");
}

#[test]
fn all_rows_show_technician_name() {
    let rows = record().detail_rows(true);
    assert_eq!(rows.len(), 34);
    let repaired_by = rows.iter().find(|(k, _)| k == "repaired by").unwrap();
    assert_eq!(repaired_by.1, "Ram");
}

#[test]
fn items_and_id_are_exposed() {
    let r = record();
    assert_eq!(r.repair_id().as_deref(), Some("R-17"));
    assert_eq!(r.items()[0].item_name.as_deref(), Some("LCD"));
}

#[test]
fn patch_flattens_changes_and_protects_id() {
    let patch = RepairPatch::new(RepairId::new("R-17").unwrap())
        .set("due", 0)
        .set("repair_id", "R-99");
    assert_eq!(
        serde_json::to_value(&patch).unwrap(),
        json!({"repair_id": "R-17", "due": 0})
    );
}
