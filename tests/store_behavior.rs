// File: tests/store_behavior.rs
use std::sync::Arc;
use tickli::context::TestContext;
use tickli::model::Priority;
use tickli::store::{InsertPosition, ListStore};

fn make_store(insert: InsertPosition) -> ListStore {
    let ctx = Arc::new(TestContext::new());
    ListStore::load(ctx, insert).unwrap()
}

#[test]
fn test_add_appends_fields_verbatim() {
    let mut store = make_store(InsertPosition::Head);

    let task = store.add("Buy milk", Priority::High).unwrap().unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(task.text, "Buy milk");
    assert_eq!(task.priority, Priority::High);
    assert!(!task.checked);
    assert!(!task.time.is_empty());
}

#[test]
fn test_add_rejects_blank_text() {
    let mut store = make_store(InsertPosition::Head);

    assert!(store.add("", Priority::Low).unwrap().is_none());
    assert!(store.add("   \t  ", Priority::Low).unwrap().is_none());
    assert!(store.is_empty());
}

#[test]
fn test_insertion_end_is_configurable() {
    let mut head = make_store(InsertPosition::Head);
    head.add("first", Priority::Low).unwrap();
    head.add("second", Priority::Low).unwrap();
    assert_eq!(head.tasks()[0].text, "second");

    let mut tail = make_store(InsertPosition::Tail);
    tail.add("first", Priority::Low).unwrap();
    tail.add("second", Priority::Low).unwrap();
    assert_eq!(tail.tasks()[0].text, "first");
}

#[test]
fn test_remove_is_idempotent() {
    let mut store = make_store(InsertPosition::Head);
    let task = store.add("gone soon", Priority::Low).unwrap().unwrap();
    store.add("stays", Priority::Low).unwrap();

    assert!(store.remove(&task.id).unwrap());
    assert_eq!(store.len(), 1);
    assert!(store.get(&task.id).is_none());

    // Absent id: no-op, list unchanged.
    assert!(!store.remove(&task.id).unwrap());
    assert!(!store.remove("no-such-id").unwrap());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_toggle_twice_is_involution() {
    let mut store = make_store(InsertPosition::Head);
    let task = store.add("flip me", Priority::Low).unwrap().unwrap();

    assert_eq!(store.toggle_checked(&task.id).unwrap(), Some(true));
    assert_eq!(store.toggle_checked(&task.id).unwrap(), Some(false));
    assert!(!store.get(&task.id).unwrap().checked);

    assert_eq!(store.toggle_checked("no-such-id").unwrap(), None);
}

#[test]
fn test_update_text_uses_same_validation_as_add() {
    let mut store = make_store(InsertPosition::Head);
    let task = store.add("old text", Priority::Low).unwrap().unwrap();

    assert!(store.update_text(&task.id, "  new text  ").unwrap());
    assert_eq!(store.get(&task.id).unwrap().text, "new text");

    // Blank edits are rejected, not applied.
    assert!(!store.update_text(&task.id, "   ").unwrap());
    assert_eq!(store.get(&task.id).unwrap().text, "new text");

    assert!(!store.update_text("no-such-id", "whatever").unwrap());
}

#[test]
fn test_update_text_does_not_touch_other_fields() {
    let mut store = make_store(InsertPosition::Head);
    let task = store.add("stable", Priority::High).unwrap().unwrap();
    store.toggle_checked(&task.id).unwrap();

    store.update_text(&task.id, "renamed").unwrap();
    let after = store.get(&task.id).unwrap();
    assert_eq!(after.id, task.id);
    assert_eq!(after.priority, Priority::High);
    assert_eq!(after.time, task.time);
    assert!(after.checked);
}

#[test]
fn test_reorder_followed_by_inverse_restores_order() {
    let mut store = make_store(InsertPosition::Tail);
    let a = store.add("a", Priority::Low).unwrap().unwrap();
    store.add("b", Priority::Low).unwrap();
    let c = store.add("c", Priority::Low).unwrap().unwrap();
    store.add("d", Priority::Low).unwrap();

    let original: Vec<String> = store.tasks().iter().map(|t| t.id.clone()).collect();

    assert!(store.reorder(&a.id, &c.id).unwrap());
    // a now holds c's old slot.
    assert_eq!(store.tasks()[2].id, a.id);

    assert!(store.reorder(&c.id, &a.id).unwrap());
    let restored: Vec<String> = store.tasks().iter().map(|t| t.id.clone()).collect();
    assert_eq!(restored, original);
}

#[test]
fn test_reorder_noop_cases() {
    let mut store = make_store(InsertPosition::Tail);
    let a = store.add("a", Priority::Low).unwrap().unwrap();
    let b = store.add("b", Priority::Low).unwrap().unwrap();

    assert!(!store.reorder(&a.id, &a.id).unwrap());
    assert!(!store.reorder(&a.id, "no-such-id").unwrap());
    assert!(!store.reorder("no-such-id", &b.id).unwrap());
    assert_eq!(store.tasks()[0].id, a.id);
}

#[test]
fn test_clear_completed_keeps_pending() {
    let mut store = make_store(InsertPosition::Tail);
    let done = store.add("done", Priority::Low).unwrap().unwrap();
    store.add("pending", Priority::Low).unwrap();
    store.toggle_checked(&done.id).unwrap();

    assert_eq!(store.clear_completed().unwrap(), 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.tasks()[0].text, "pending");

    // Nothing left to clear.
    assert_eq!(store.clear_completed().unwrap(), 0);
}

#[test]
fn test_clear_all_empties_list() {
    let mut store = make_store(InsertPosition::Head);
    store.add("one", Priority::Low).unwrap();
    store.add("two", Priority::High).unwrap();

    assert_eq!(store.clear_all().unwrap(), 2);
    assert!(store.is_empty());
    assert_eq!(store.clear_all().unwrap(), 0);
}

#[test]
fn test_progress_counts_checked() {
    let mut store = make_store(InsertPosition::Head);
    let a = store.add("a", Priority::Low).unwrap().unwrap();
    store.add("b", Priority::Low).unwrap();
    assert_eq!(store.progress(), (0, 2));

    store.toggle_checked(&a.id).unwrap();
    assert_eq!(store.progress(), (1, 2));
}

// The worked lifecycle from the original widget: add, complete, delete.
#[test]
fn test_full_lifecycle() {
    let mut store = make_store(InsertPosition::Head);
    assert!(store.is_empty());

    let task = store.add("Buy milk", Priority::High).unwrap().unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.tasks()[0].text, "Buy milk");
    assert!(!store.tasks()[0].checked);

    store.toggle_checked(&task.id).unwrap();
    assert!(store.get(&task.id).unwrap().checked);

    store.remove(&task.id).unwrap();
    assert!(store.is_empty());
}
