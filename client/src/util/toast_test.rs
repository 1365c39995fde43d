use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut queue = ToastQueue::new();
    let a = queue.success("Saved");
    let b = queue.error("Failed");
    assert!(b > a);
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.latest().unwrap().kind, ToastKind::Error);
}

#[test]
fn toast_visible_then_fading_then_expired() {
    let mut queue = ToastQueue::new();
    queue.success("Account created successfully!");

    queue.advance(VISIBLE_MS - 1);
    assert_eq!(queue.active().next().unwrap().1, ToastPhase::Visible);

    queue.advance(1);
    assert_eq!(queue.active().next().unwrap().1, ToastPhase::Fading);

    queue.advance(FADE_MS);
    assert!(queue.is_empty());
}

#[test]
fn later_toast_outlives_earlier_one() {
    let mut queue = ToastQueue::new();
    queue.success("first");
    queue.advance(2_000);
    queue.success("second");
    queue.advance(1_600);

    let remaining: Vec<_> = queue.active().map(|(t, _)| t.message.clone()).collect();
    assert_eq!(remaining, vec!["second".to_owned()]);
}

#[test]
fn dismiss_removes_by_id() {
    let mut queue = ToastQueue::new();
    let id = queue.push("info", ToastKind::Info);
    queue.dismiss(id);
    assert!(queue.is_empty());
}
