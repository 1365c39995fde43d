use super::*;

#[test]
fn default_is_idle_and_empty() {
    let list: ListState<u32> = ListState::default();
    assert!(list.is_empty());
    assert!(!list.loading);
    assert!(list.error.is_none());
}

#[test]
fn finish_replaces_items_and_clears_error() {
    let mut list = ListState { items: vec![1], loading: false, error: Some("old".to_owned()) };
    list.begin_load();
    assert!(list.loading);
    assert!(list.error.is_none());

    list.finish(vec![2, 3]);
    assert_eq!(list.items, vec![2, 3]);
    assert!(!list.loading);
}

#[test]
fn fail_keeps_previous_items() {
    let mut list = ListState { items: vec![7], loading: false, error: None };
    list.begin_load();
    list.fail("Failed to load accounts");
    assert_eq!(list.items, vec![7]);
    assert_eq!(list.error.as_deref(), Some("Failed to load accounts"));
    assert!(!list.loading);
}
