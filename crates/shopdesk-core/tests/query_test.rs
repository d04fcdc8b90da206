use chrono::NaiveDate;
use shopdesk_core::query::{ListQuery, QueryError};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

#[test]
fn default_query_is_first_page_without_filters() {
    let q = ListQuery::default();
    assert_eq!(q.page(), 1);
    assert_eq!(q.search(), "");
    assert!(!q.is_filtered());
    assert!(q.to_pairs().is_empty());
}

#[test]
fn search_resets_page() {
    let q = ListQuery::default().with_page(4).with_search("screen");
    assert_eq!(q.page(), 1);
    assert_eq!(q.search(), "screen");
}

#[test]
fn date_range_resets_page() {
    let q = ListQuery::default()
        .with_page(3)
        .with_date_range(Some(day(1)), Some(day(31)))
        .unwrap();
    assert_eq!(q.page(), 1);
    assert_eq!(q.start_date(), Some(day(1)));
}

#[test]
fn inverted_date_range_is_rejected() {
    let err = ListQuery::default()
        .with_date_range(Some(day(9)), Some(day(2)))
        .unwrap_err();
    assert_eq!(
        err,
        QueryError::InvertedRange {
            start: day(9),
            end: day(2)
        }
    );
}

#[test]
fn page_zero_becomes_first_page() {
    assert_eq!(ListQuery::default().with_page(0).page(), 1);
}

#[test]
fn half_date_range_is_not_sent() {
    let q = ListQuery::default()
        .with_date_range(Some(day(1)), None)
        .unwrap();
    assert!(q.is_filtered());
    assert!(q.to_pairs().is_empty());
}

#[test]
fn pairs_render_in_backend_order() {
    let q = ListQuery::scoped([("category", "3")])
        .with_search("  lcd ")
        .with_date_range(Some(day(1)), Some(day(2)))
        .unwrap()
        .with_page(2);
    assert_eq!(
        q.to_string(),
        "category=3&search=lcd&start_date=2024-05-01&end_date=2024-05-02&page=2"
    );
}

#[test]
fn cleared_keeps_scope_only() {
    let q = ListQuery::scoped([("category", "3")])
        .with_search("lcd")
        .with_page(5)
        .cleared();
    assert_eq!(q, ListQuery::scoped([("category", "3")]));
    assert_eq!(q.page(), 1);
}
