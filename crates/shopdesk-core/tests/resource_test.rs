use serde_json::json;
use shopdesk_core::resource::{
    Category, Item, NewCategory, NewPurchase, PurchaseTransaction, Resource,
};
use shopdesk_core::types::{CategoryName, RepairId, ValidationError};

#[test]
fn member_path_appends_id() {
    assert_eq!(
        PurchaseTransaction::member_path(42),
        "inventory/purchasetransaction/42/"
    );
    assert_eq!(Category::member_path(3), "inventory/category/3/");
}

#[test]
fn purchase_transaction_deserialises_backend_shape() {
    let body = json!({
        "id": 9,
        "date": "2024-05-01",
        "total_amount": 1500.0,
        "enterprise": 1,
        "purchased_by": 4,
        "purchased_by_name": "Sita",
        "purchases": [
            {"id": 1, "item": 2, "item_name": "LCD", "quantity": 3, "price": 500.0}
        ]
    });
    let tx: PurchaseTransaction = serde_json::from_value(body).unwrap();
    assert_eq!(tx.id(), 9);
    assert_eq!(tx.purchases[0].line_total(), 1500.0);
}

#[test]
fn item_without_stock_deserialises() {
    let item: Item = serde_json::from_value(json!({
        "id": 1, "name": "Battery", "quantity": null, "cost": 800.0, "category": 2
    }))
    .unwrap();
    assert!(item.quantity.is_none());
    assert!(item.category_name.is_none());
}

#[test]
fn purchase_line_parses() {
    let line: NewPurchase = "12:3:450.5".parse().unwrap();
    assert_eq!(line.item, 12);
    assert_eq!(line.quantity, 3);
    assert!((line.line_total() - 1351.5).abs() < f64::EPSILON);
}

#[test]
fn purchase_line_rejects_bad_input() {
    assert!(matches!(
        "12:3".parse::<NewPurchase>(),
        Err(ValidationError::MalformedLine(_))
    ));
    assert!(matches!(
        "12:0:10".parse::<NewPurchase>(),
        Err(ValidationError::InvalidNumber { field: "quantity", .. })
    ));
    assert!(matches!(
        "x:1:10".parse::<NewPurchase>(),
        Err(ValidationError::InvalidNumber { field: "item", .. })
    ));
}

#[test]
fn category_name_is_validated() {
    assert_eq!(CategoryName::new("  "), Err(ValidationError::Empty));
    assert_eq!(
        CategoryName::new(&"a".repeat(21)),
        Err(ValidationError::TooLong { max: 20, got: 21 })
    );
    assert_eq!(CategoryName::new(" Screens ").unwrap().as_str(), "Screens");
}

#[test]
fn new_category_serialises_plain_name() {
    let draft = NewCategory {
        name: CategoryName::new("Screens").unwrap(),
    };
    assert_eq!(serde_json::to_value(&draft).unwrap(), json!({"name": "Screens"}));
}

#[test]
fn category_match_ignores_case() {
    let c = Category {
        id: 1,
        name: "Batteries".to_owned(),
    };
    assert!(c.matches("BATT"));
    assert!(!c.matches("screen"));
}

#[test]
fn repair_id_rejects_long_search() {
    assert!(RepairId::new(&"9".repeat(41)).is_err());
    assert!(RepairId::new("R-1024").is_ok());
}

#[test]
fn repair_id_is_validated_when_deserialised() {
    let long = serde_json::Value::String("9".repeat(41));
    assert!(serde_json::from_value::<RepairId>(long).is_err());
    assert!(serde_json::from_value::<RepairId>(json!("   ")).is_err());

    let id: RepairId = serde_json::from_value(json!(" R-1024 ")).unwrap();
    assert_eq!(id.as_str(), "R-1024");
    assert_eq!(serde_json::to_value(&id).unwrap(), json!("R-1024"));
}
