use chrono::NaiveDate;
use shopdesk_client::client::PageRequest;
use shopdesk_client::filter::ListFilterState;
use shopdesk_core::page::PageResult;
use shopdesk_core::query::ListQuery;

fn on_page(current_page: u32, next: Option<&str>, previous: Option<&str>) -> PageResult<u32> {
    PageResult {
        items: vec![1, 2, 3],
        next_cursor: next.map(str::to_owned),
        previous_cursor: previous.map(str::to_owned),
        total_count: 30,
        page_count: 3,
        current_page,
    }
}

fn query_of(request: PageRequest) -> ListQuery {
    match request {
        PageRequest::Query(query) => query,
        PageRequest::Cursor(cursor) => panic!("expected a query, got cursor {cursor}"),
    }
}

#[test]
fn search_restarts_at_first_page() {
    let mut filter = ListFilterState::default();
    filter.observe(&on_page(3, None, Some("c2")));

    let query = query_of(filter.set_search("  lcd "));

    assert_eq!(query.search(), "lcd");
    assert_eq!(query.page(), 1);
    assert!(!filter.has_previous());
}

#[test]
fn date_range_restarts_at_first_page() {
    let mut filter = ListFilterState::default();
    filter.observe(&on_page(2, None, None));
    let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();

    let query = query_of(filter.set_date_range(Some(start), Some(end)).unwrap());

    assert_eq!(query.page(), 1);
    assert_eq!(query.start_date(), Some(start));
}

#[test]
fn inverted_range_keeps_the_live_query() {
    let mut filter = ListFilterState::new(ListQuery::default().with_search("x"));
    let start = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    assert!(filter.set_date_range(Some(start), Some(end)).is_err());
    assert_eq!(filter.current_query().search(), "x");
    assert_eq!(filter.current_query().start_date(), None);
}

#[test]
fn adjacent_pages_follow_cursors() {
    let mut filter = ListFilterState::default();
    filter.observe(&on_page(2, Some("c3"), Some("c1")));

    assert_eq!(filter.go_to_page(3), Some(PageRequest::Cursor("c3".to_owned())));
    assert_eq!(filter.current_query().page(), 3);
    assert!(!filter.has_next());
}

#[test]
fn distant_or_missing_pages_are_ignored() {
    let mut filter = ListFilterState::default();
    filter.observe(&on_page(1, Some("c2"), None));

    assert_eq!(filter.go_to_page(3), None);
    assert_eq!(filter.previous_page(), None);
    assert_eq!(filter.current_query().page(), 1);
    assert!(filter.has_next());
}

#[test]
fn clear_keeps_the_scope() {
    let mut filter = ListFilterState::new(ListQuery::scoped([("category", "4")]));
    filter.set_search("hdmi");

    let query = query_of(filter.clear());

    assert_eq!(query.search(), "");
    assert_eq!(query.scope(), &[("category".to_owned(), "4".to_owned())]);
}

#[test]
fn land_on_keeps_filters() {
    let mut filter = ListFilterState::default();
    filter.set_search("cable");

    let query = query_of(filter.land_on(2));

    assert_eq!(query.search(), "cable");
    assert_eq!(query.page(), 2);
}
