use shopdesk_core::page::{page_count_for, Envelope, PageResult};

fn envelope(results: Vec<u32>, count: u64) -> Envelope<u32> {
    Envelope {
        results,
        next: None,
        previous: None,
        count: Some(count),
        total_pages: None,
        page: None,
    }
}

#[test]
fn bare_list_is_a_single_page() {
    let page = PageResult::from_bare(vec![1, 2, 3]);
    assert_eq!(page.page_count, 1);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_count, 3);
    assert!(!page.has_next());
    assert!(!page.has_previous());
}

#[test]
fn empty_bare_list_still_has_one_page() {
    let page: PageResult<u32> = PageResult::from_bare(vec![]);
    assert_eq!(page.page_count, 1);
    assert_eq!(page.total_count, 0);
}

#[test]
fn page_count_rounds_up_by_ten() {
    assert_eq!(page_count_for(0), 1);
    assert_eq!(page_count_for(1), 1);
    assert_eq!(page_count_for(10), 1);
    assert_eq!(page_count_for(11), 2);
    assert_eq!(page_count_for(25), 3);
}

#[test]
fn envelope_uses_requested_page() {
    let page = PageResult::from_envelope(envelope(vec![1; 10], 25), 2);
    assert_eq!(page.page_count, 3);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.total_count, 25);
}

#[test]
fn envelope_page_fields_win_but_are_clamped() {
    let mut env = envelope(vec![1], 25);
    env.total_pages = Some(4);
    env.page = Some(9);
    let page = PageResult::from_envelope(env, 1);
    assert_eq!(page.page_count, 4);
    assert_eq!(page.current_page, 4);
}

#[test]
fn envelope_without_count_counts_its_rows() {
    let mut env = envelope(vec![1, 2], 0);
    env.count = None;
    let page = PageResult::from_envelope(env, 1);
    assert_eq!(page.total_count, 2);
}

#[test]
fn deleting_sole_row_on_page_three_lands_on_page_two() {
    let page = PageResult::from_envelope(envelope(vec![7], 25), 3);
    assert_eq!(page.page_count, 3);
    assert_eq!(page.target_page_after_delete(), 2);
}

#[test]
fn deleting_sole_row_on_last_page_steps_back() {
    let page = PageResult::from_envelope(envelope(vec![7], 21), 3);
    assert_eq!(page.target_page_after_delete(), 2);
}

#[test]
fn deleting_one_of_many_rows_stays_put() {
    let page = PageResult::from_envelope(envelope(vec![1; 10], 25), 2);
    assert_eq!(page.target_page_after_delete(), 2);
}

#[test]
fn deleting_last_row_overall_stays_on_page_one() {
    let page = PageResult::from_bare(vec![1]);
    assert_eq!(page.target_page_after_delete(), 1);
}

#[test]
fn bulk_delete_clearing_the_page_steps_back() {
    let page = PageResult::from_envelope(envelope(vec![1, 2, 3], 23), 3);
    assert_eq!(page.target_page_after_bulk_delete(3, 3), 2);
    assert_eq!(page.target_page_after_bulk_delete(2, 2), 3);
}

#[test]
fn bulk_delete_from_another_page_keeps_this_one() {
    let page = PageResult::from_envelope(envelope((11..=20).collect(), 25), 2);
    assert_eq!(page.target_page_after_bulk_delete(10, 0), 2);
}

#[test]
fn bulk_delete_elsewhere_still_clamps_to_the_new_page_count() {
    let page = PageResult::from_envelope(envelope(vec![21, 22, 23], 23), 3);
    assert_eq!(page.target_page_after_bulk_delete(5, 0), 2);
}

#[test]
fn append_keeps_totals() {
    let mut page = PageResult::from_envelope(envelope(vec![1, 2], 12), 2);
    page.append(3);
    assert_eq!(page.items, vec![1, 2, 3]);
    assert_eq!(page.total_count, 12);
    assert_eq!(page.page_count, 2);
}
