use super::*;
use crate::net::testing::Harness;
use crate::net::types::{AccountType, EntryKind};
use serde_json::json;

fn account_json(id: &str, name: &str) -> serde_json::Value {
    json!({ "id": id, "user_id": "u1", "name": name, "type": "checking", "balance": 100.0, "currency": "USD" })
}

// =============================================================
// paths
// =============================================================

#[test]
fn item_endpoints_encode_ids() {
    assert_eq!(account_endpoint("a1"), "/api/accounts/a1");
    assert_eq!(transaction_endpoint("t 1"), "/api/transactions/t%201");
    assert_eq!(budget_endpoint("b/1"), "/api/budgets/b%2F1");
}

#[test]
fn status_error_prefers_body_over_fallback() {
    let err = status_error(&HttpResponse::new(500, "  boom \n"), "fallback");
    assert!(matches!(err, ApiError::Status { status: 500, ref message } if message == "boom"));
    let err = status_error(&HttpResponse::new(404, ""), "fallback");
    assert_eq!(err.user_message(), "fallback");
}

// =============================================================
// auth
// =============================================================

#[tokio::test]
async fn login_stores_token_and_returns_pending_landing() {
    let h = Harness::new("/login", None);
    h.state.set_pending_redirect("/budgets");
    h.transport.reply_json(
        Method::Post,
        "/api/users/login",
        200,
        &json!({ "user": { "id": "u1", "email": "ana@example.test" }, "token": "jwt-1" }),
    );

    let outcome = login(&h.session, "ana@example.test", "pw").await.unwrap();

    assert_eq!(outcome.user.id, "u1");
    assert_eq!(outcome.landing, "/budgets");
    assert_eq!(h.session.get_token().unwrap().as_str(), "jwt-1");
    let sent = &h.transport.sent()[0];
    assert_eq!(sent.headers.count("authorization"), 0);
    assert_eq!(sent.body.as_deref(), Some(r#"{"email":"ana@example.test","password":"pw"}"#));
}

#[tokio::test]
async fn login_rejection_surfaces_server_message() {
    let h = Harness::new("/login", None);
    h.transport.reply(Method::Post, "/api/users/login", 401, "invalid credentials\n");

    let err = login(&h.session, "ana@example.test", "bad").await.unwrap_err();

    assert_eq!(err.user_message(), "invalid credentials");
    assert!(h.session.get_token().is_none());
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn login_with_blank_token_is_unauthenticated() {
    let h = Harness::new("/login", None);
    h.transport.reply_json(Method::Post, "/api/users/login", 200, &json!({ "user": { "id": "u1" }, "token": "" }));

    let err = login(&h.session, "a", "b").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthenticated));
    assert!(h.session.get_token().is_none());
}

#[tokio::test]
async fn register_signs_in_with_default_landing() {
    let h = Harness::new("/register", None);
    h.transport.reply_json(Method::Post, "/api/users", 200, &json!({ "user": { "id": "u2" }, "token": "jwt-2" }));

    let request = RegisterRequest { email: "b@example.test", password: "pw", first_name: Some("Bo"), last_name: None };
    let outcome = register(&h.session, &request).await.unwrap();

    assert_eq!(outcome.landing, "/dashboard");
    assert!(h.session.is_authenticated());
}

// =============================================================
// accounts
// =============================================================

#[tokio::test]
async fn list_accounts_unwraps_envelope() {
    let h = Harness::signed_in("/accounts");
    h.transport.reply_json(
        Method::Get,
        "/api/accounts",
        200,
        &json!({ "accounts": [account_json("a1", "Everyday"), account_json("a2", "Rainy day")] }),
    );

    let accounts = list_accounts(&h.session).await.unwrap();

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[1].name, "Rainy day");
}

#[tokio::test]
async fn list_accounts_without_token_is_unauthenticated() {
    let h = Harness::new("/accounts", None);

    let err = list_accounts(&h.session).await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthenticated));
    assert_eq!(h.transport.sent_count(), 0);
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn rejected_token_clears_session() {
    let h = Harness::signed_in("/accounts");
    h.transport.reply(Method::Get, "/api/accounts", 401, "Unauthorized");

    let err = list_accounts(&h.session).await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthenticated));
    assert!(!h.session.is_authenticated());
}

#[tokio::test]
async fn network_failure_is_unavailable_and_keeps_token() {
    let h = Harness::signed_in("/accounts");
    h.transport.fail(Method::Get, "/api/accounts", TransportError::Network("connection refused".to_owned()));

    let err = list_accounts(&h.session).await.unwrap_err();

    assert!(matches!(err, ApiError::Unavailable));
    assert_eq!(err.user_message(), "server unreachable");
    assert!(h.session.is_authenticated());
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn create_account_posts_draft() {
    let h = Harness::signed_in("/accounts");
    h.transport.reply_json(
        Method::Post,
        "/api/accounts",
        200,
        &json!({ "message": "Account created successfully", "account": account_json("a9", "Visa"), "accounts": [account_json("a9", "Visa")] }),
    );

    let draft = AccountDraft { name: "Visa".into(), kind: AccountType::Credit, balance: 0.0, currency: None };
    let created = create_account(&h.session, &draft).await.unwrap();

    assert_eq!(created.account.id, "a9");
    let body: serde_json::Value = serde_json::from_str(h.transport.sent()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["type"], "credit");
}

#[tokio::test]
async fn update_account_puts_to_item_path() {
    let h = Harness::signed_in("/accounts");
    h.transport.reply_json(Method::Put, "/api/accounts/a1", 200, &account_json("a1", "Renamed"));

    let draft = AccountDraft { name: "Renamed".into(), kind: AccountType::Checking, balance: 5.0, currency: None };
    let account = update_account(&h.session, "a1", &draft).await.unwrap();

    assert_eq!(account.name, "Renamed");
    assert_eq!(h.transport.sent()[0].method, Method::Put);
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let h = Harness::signed_in("/accounts");
    h.transport.reply(Method::Get, "/api/accounts/a1", 200, "<html>");

    let err = get_account(&h.session, "a1").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

// =============================================================
// transactions
// =============================================================

#[tokio::test]
async fn list_transactions_appends_filter_query() {
    let h = Harness::signed_in("/transactions");
    h.transport.reply(Method::Get, "/api/transactions?account_id=a1&limit=10", 200, r#"{"transactions":null}"#);

    let filter = TransactionFilter { account_id: Some("a1".into()), limit: Some(10), ..TransactionFilter::default() };
    let rows = list_transactions(&h.session, &filter).await.unwrap();

    assert!(rows.is_empty());
    assert_eq!(h.transport.sent_paths(), vec!["/api/transactions?account_id=a1&limit=10".to_owned()]);
}

#[tokio::test]
async fn create_transaction_sends_negative_expense() {
    let h = Harness::signed_in("/transactions");
    h.transport.reply_json(
        Method::Post,
        "/api/transactions",
        201,
        &json!({ "message": "Transaction created successfully", "data": { "id": "t1", "amount": -12.0, "type": "expense" } }),
    );

    let draft = TransactionDraft {
        account_id: "a1".into(),
        category_id: None,
        amount: 12.0,
        description: "Lunch".into(),
        date: "2024-03-05T00:00:00Z".into(),
        kind: EntryKind::Expense,
    };
    let created = create_transaction(&h.session, draft).await.unwrap();

    assert_eq!(created.id, "t1");
    let body: serde_json::Value = serde_json::from_str(h.transport.sent()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["amount"], -12.0);
    assert_eq!(body["type"], "expense");
}

#[tokio::test]
async fn delete_transaction_ignores_body() {
    let h = Harness::signed_in("/transactions");
    h.transport.reply(Method::Delete, "/api/transactions/t1", 204, "");

    delete_transaction(&h.session, "t1").await.unwrap();
    assert_eq!(h.transport.sent()[0].method, Method::Delete);
}

#[tokio::test]
async fn delete_failure_uses_fallback_message() {
    let h = Harness::signed_in("/transactions");
    h.transport.reply(Method::Delete, "/api/transactions/t1", 500, "");

    let err = delete_transaction(&h.session, "t1").await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to delete transaction");
}

// =============================================================
// budgets / analytics / metrics
// =============================================================

#[tokio::test]
async fn list_budgets_accepts_bare_array_and_null() {
    let h = Harness::signed_in("/budgets");
    h.transport
        .reply(
            Method::Get,
            "/api/budgets",
            200,
            r#"[{"id":"b1","category_id":"c1","amount":200,"period_start":"2024-03-01T00:00:00Z","period_end":"2024-03-31T00:00:00Z"}]"#,
        )
        .reply(Method::Get, "/api/budgets", 200, "null");

    assert_eq!(list_budgets(&h.session, &BudgetFilter::default()).await.unwrap().len(), 1);
    assert!(list_budgets(&h.session, &BudgetFilter::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn budget_summary_passes_period() {
    let h = Harness::signed_in("/budgets");
    h.transport.reply_json(
        Method::Get,
        "/api/budgets/summary?period=weekly",
        200,
        &json!({ "total_budget": 500.0, "total_spent": 125.0, "remaining_budget": 375.0, "spent_percent": 25.0 }),
    );

    let summary = budget_summary(&h.session, BudgetPeriod::Weekly).await.unwrap();
    assert_eq!(summary.remaining_budget, 375.0);
}

#[tokio::test]
async fn analytics_calls_build_query_paths() {
    let h = Harness::signed_in("/analytics");
    h.transport
        .reply_json(
            Method::Get,
            "/api/analytics/cash-flow?period=quarter",
            200,
            &json!({ "income": 9.0, "expenses": 4.0, "net_income": 5.0 }),
        )
        .reply(Method::Get, "/api/analytics/top-merchants?period=month&limit=5", 200, "[]")
        .reply(Method::Get, "/api/analytics/monthly-spending?months=6", 200, "null");

    assert_eq!(cash_flow(&h.session, ReportPeriod::Quarter).await.unwrap().net_income, 5.0);
    assert!(top_merchants(&h.session, ReportPeriod::Month, 5).await.unwrap().is_empty());
    assert!(monthly_spending(&h.session, 6).await.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_metric_reads_number_or_object() {
    let h = Harness::signed_in("/dashboard");
    h.transport
        .reply(Method::Get, "/api/metrics?type=net_worth", 200, r#"{"value": 1500.25}"#)
        .reply(Method::Get, "/api/analytics/income?period=month", 200, "4200");

    assert_eq!(fetch_metric(&h.session, "/api/metrics?type=net_worth").await.unwrap(), 1500.25);
    assert_eq!(fetch_metric(&h.session, "/api/analytics/income?period=month").await.unwrap(), 4200.0);
}
