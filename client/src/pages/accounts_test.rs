use super::*;
use crate::net::testing::Harness;
use crate::net::transport::Method;
use crate::net::types::AccountType;
use crate::util::toast::ToastKind;
use serde_json::json;

fn draft(name: &str) -> AccountDraft {
    AccountDraft { name: name.into(), kind: AccountType::Savings, balance: 250.0, currency: None }
}

fn listing(names: &[&str]) -> serde_json::Value {
    let accounts: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "id": format!("a{i}"), "name": name, "type": "checking", "balance": 100.0 }))
        .collect();
    json!({ "accounts": accounts })
}

#[tokio::test]
async fn load_fills_list_and_totals() {
    let h = Harness::signed_in("/accounts");
    h.transport.reply_json(Method::Get, "/api/accounts", 200, &listing(&["Everyday", "Rainy day"]));

    let mut page = AccountsPage::new(h.session.clone());
    page.load().await;

    assert!(!page.accounts.loading);
    assert_eq!(page.accounts.items.len(), 2);
    assert_eq!(page.total_balance(), 200.0);
    assert!(page.toasts.is_empty());
}

#[tokio::test]
async fn load_failure_keeps_previous_items_and_toasts() {
    let h = Harness::signed_in("/accounts");
    h.transport
        .reply_json(Method::Get, "/api/accounts", 200, &listing(&["Everyday"]))
        .reply(Method::Get, "/api/accounts", 500, "");

    let mut page = AccountsPage::new(h.session.clone());
    page.load().await;
    page.load().await;

    assert_eq!(page.accounts.items.len(), 1);
    assert_eq!(page.accounts.error.as_deref(), Some("Failed to fetch accounts"));
    let toast = page.toasts.latest().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Failed to load accounts. Please try again.");
}

#[tokio::test]
async fn create_refreshes_and_toasts() {
    let h = Harness::signed_in("/accounts");
    h.transport
        .reply_json(
            Method::Post,
            "/api/accounts",
            200,
            &json!({ "account": { "id": "a1", "name": "Rainy day" }, "accounts": [] }),
        )
        .reply_json(Method::Get, "/api/accounts", 200, &listing(&["Everyday", "Rainy day"]));

    let mut page = AccountsPage::new(h.session.clone());
    assert!(page.save(None, &draft("Rainy day")).await);

    assert_eq!(h.transport.sent_paths(), vec!["/api/accounts".to_owned(), "/api/accounts".to_owned()]);
    assert_eq!(page.accounts.items.len(), 2);
    assert_eq!(page.toasts.latest().unwrap().message, "Account created successfully");
}

#[tokio::test]
async fn update_puts_then_refreshes() {
    let h = Harness::signed_in("/accounts");
    h.transport
        .reply_json(Method::Put, "/api/accounts/a0", 200, &json!({ "id": "a0", "name": "Renamed" }))
        .reply_json(Method::Get, "/api/accounts", 200, &listing(&["Renamed"]));

    let mut page = AccountsPage::new(h.session.clone());
    assert!(page.save(Some("a0"), &draft("Renamed")).await);

    assert_eq!(page.accounts.items[0].name, "Renamed");
    let toast = page.toasts.latest().unwrap();
    assert_eq!((toast.kind, toast.message.as_str()), (ToastKind::Success, "Account updated successfully"));
}

#[tokio::test]
async fn save_failure_toasts_without_refresh() {
    let h = Harness::signed_in("/accounts");
    h.transport.reply(Method::Post, "/api/accounts", 400, "name is required");

    let mut page = AccountsPage::new(h.session.clone());
    assert!(!page.save(None, &draft("")).await);

    assert_eq!(h.transport.sent_count(), 1);
    assert_eq!(page.toasts.latest().unwrap().message, "Error saving account");
}
