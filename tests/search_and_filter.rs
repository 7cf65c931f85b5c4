// File: tests/search_and_filter.rs
// Visibility queries are pure: they narrow the view, never the list.
use std::sync::Arc;
use tickli::context::TestContext;
use tickli::model::Priority;
use tickli::store::{Filter, InsertPosition, ListStore};

fn seeded_store() -> ListStore {
    let ctx = Arc::new(TestContext::new());
    let mut store = ListStore::load(ctx, InsertPosition::Tail).unwrap();
    store.add("Buy milk", Priority::High).unwrap();
    store.add("Call the plumber", Priority::Medium).unwrap();
    let done = store.add("Water plants", Priority::Low).unwrap().unwrap();
    store.toggle_checked(&done.id).unwrap();
    store
}

#[test]
fn test_filter_all_shows_everything_in_order() {
    let store = seeded_store();
    let visible = store.visible(Filter::All, "");
    assert_eq!(visible.len(), 3);
    assert_eq!(visible[0].text, "Buy milk");
    assert_eq!(visible[2].text, "Water plants");
}

#[test]
fn test_filter_pending_and_completed_partition() {
    let store = seeded_store();

    let pending = store.visible(Filter::Pending, "");
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().all(|t| !t.checked));

    let completed = store.visible(Filter::Completed, "");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].text, "Water plants");
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let store = seeded_store();

    assert_eq!(store.visible(Filter::All, "MILK").len(), 1);
    assert_eq!(store.visible(Filter::All, "pl").len(), 2); // plumber, plants
    assert!(store.visible(Filter::All, "nothing here").is_empty());
}

#[test]
fn test_search_composes_with_filter() {
    let store = seeded_store();

    // "pl" matches a pending and a completed task; the filter narrows it.
    let hits = store.visible(Filter::Completed, "pl");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "Water plants");
}

#[test]
fn test_queries_do_not_mutate_the_list() {
    let store = seeded_store();
    let before: Vec<String> = store.tasks().iter().map(|t| t.id.clone()).collect();

    let _ = store.visible(Filter::Completed, "milk");
    let _ = store.visible(Filter::Pending, "zzz");

    let after: Vec<String> = store.tasks().iter().map(|t| t.id.clone()).collect();
    assert_eq!(before, after);
    assert_eq!(store.len(), 3);
}
