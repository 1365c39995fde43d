//! Typed REST calls against the finance API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every call except `login`/`register` goes through
//! [`SessionClient::authenticated_request`], so token attachment, 401
//! handling and login redirects live in one place. This module only adds
//! paths, payload types and status-to-error mapping.
//!
//! ERROR HANDLING
//! ==============
//! A session outcome of `None` becomes [`ApiError::Unauthenticated`] when
//! the token is gone (never stored, or cleared by a 401) and
//! [`ApiError::Unavailable`] when it survived, i.e. no response arrived.
//! Non-2xx responses become
//! [`ApiError::Status`] carrying the server's body text, or a per-call
//! fallback message when the body is empty.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::session::{RequestOptions, SessionClient};
use super::transport::{HttpResponse, Method, TransportError};
use super::types::{
    Account, AccountCreated, AccountDraft, AccountList, Budget, BudgetDraft, BudgetFilter, BudgetPeriod,
    BudgetSummary, CashFlow, Category, CategoryList, FinancialReport, IncomeVsExpenses, LoginRequest, LoginResponse,
    MerchantSpending, MetricValue, MonthlySpending, RegisterRequest, ReportPeriod, SpendingByCategory, Transaction,
    TransactionCreated, TransactionDraft, TransactionFilter, TransactionList, TransactionUpdate, User,
};
use crate::state::session::Token;

const LOGIN_ENDPOINT: &str = "/api/users/login";
const REGISTER_ENDPOINT: &str = "/api/users";
const ACCOUNTS_ENDPOINT: &str = "/api/accounts";
const TRANSACTIONS_ENDPOINT: &str = "/api/transactions";
const RECENT_TRANSACTIONS_ENDPOINT: &str = "/api/transactions/recent";
const CATEGORIES_ENDPOINT: &str = "/api/categories";
const BUDGETS_ENDPOINT: &str = "/api/budgets";
const BUDGET_SUMMARY_ENDPOINT: &str = "/api/budgets/summary";
const ANALYTICS_ENDPOINT: &str = "/api/analytics";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not authenticated")]
    Unauthenticated,
    #[error("server unreachable")]
    Unavailable,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },
    #[error("invalid payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Message suitable for a toast or CLI line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Successful sign-in: who logged in and where they should land next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user: User,
    pub landing: String,
}

// =============================================================================
// PATHS
// =============================================================================

fn account_endpoint(id: &str) -> String {
    format!("{ACCOUNTS_ENDPOINT}/{}", urlencoding::encode(id))
}

fn transaction_endpoint(id: &str) -> String {
    format!("{TRANSACTIONS_ENDPOINT}/{}", urlencoding::encode(id))
}

fn budget_endpoint(id: &str) -> String {
    format!("{BUDGETS_ENDPOINT}/{}", urlencoding::encode(id))
}

fn analytics_endpoint(kind: &str, query: &str) -> String {
    format!("{ANALYTICS_ENDPOINT}/{kind}?{query}")
}

fn status_error(response: &HttpResponse, fallback: &str) -> ApiError {
    let body = response.text().trim();
    let message = if body.is_empty() { fallback.to_owned() } else { body.to_owned() };
    ApiError::Status { status: response.status, message }
}

// =============================================================================
// PLUMBING
// =============================================================================

async fn send(
    session: &SessionClient,
    target: &str,
    options: RequestOptions,
    fallback: &str,
) -> Result<HttpResponse, ApiError> {
    let Some(response) = session.authenticated_request(target, options).await? else {
        // Network failures keep the token; missing and rejected tokens do not.
        if session.is_authenticated() {
            return Err(ApiError::Unavailable);
        }
        return Err(ApiError::Unauthenticated);
    };
    if !response.ok() {
        return Err(status_error(&response, fallback));
    }
    Ok(response)
}

async fn get_json<T: DeserializeOwned>(session: &SessionClient, target: &str, fallback: &str) -> Result<T, ApiError> {
    let response = send(session, target, RequestOptions::new(), fallback).await?;
    Ok(response.json()?)
}

async fn send_json<B, T>(
    session: &SessionClient,
    method: Method,
    target: &str,
    body: &B,
    fallback: &str,
) -> Result<T, ApiError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = send(session, target, RequestOptions::json(method, body)?, fallback).await?;
    Ok(response.json()?)
}

async fn public_auth(session: &SessionClient, target: &str, options: RequestOptions, fallback: &str) -> Result<LoginOutcome, ApiError> {
    let response = session.public_request(target, options).await?;
    if !response.ok() {
        return Err(status_error(&response, fallback));
    }
    let body: LoginResponse = response.json()?;
    let Some(token) = Token::new(body.token) else {
        tracing::warn!(%target, "auth response carried an empty token");
        return Err(ApiError::Unauthenticated);
    };
    let landing = session.complete_login(&token);
    tracing::info!(user = %body.user.id, %landing, "signed in");
    Ok(LoginOutcome { user: body.user, landing })
}

// =============================================================================
// AUTH
// =============================================================================

/// Exchange credentials for a token, store it, and resolve the landing page.
///
/// # Errors
///
/// `Status` for rejected credentials, `Transport` when the server is
/// unreachable.
pub async fn login(session: &SessionClient, email: &str, password: &str) -> Result<LoginOutcome, ApiError> {
    let options = RequestOptions::json(Method::Post, &LoginRequest { email, password })?;
    public_auth(session, LOGIN_ENDPOINT, options, "Login failed").await
}

/// Create an account and sign in as it.
///
/// # Errors
///
/// Same as [`login`].
pub async fn register(session: &SessionClient, request: &RegisterRequest<'_>) -> Result<LoginOutcome, ApiError> {
    let options = RequestOptions::json(Method::Post, request)?;
    public_auth(session, REGISTER_ENDPOINT, options, "Registration failed").await
}

// =============================================================================
// ACCOUNTS
// =============================================================================

/// # Errors
///
/// See [`ApiError`].
pub async fn list_accounts(session: &SessionClient) -> Result<Vec<Account>, ApiError> {
    let list: AccountList = get_json(session, ACCOUNTS_ENDPOINT, "Failed to fetch accounts").await?;
    Ok(list.accounts)
}

/// # Errors
///
/// See [`ApiError`].
pub async fn get_account(session: &SessionClient, id: &str) -> Result<Account, ApiError> {
    get_json(session, &account_endpoint(id), "Failed to fetch account").await
}

/// Returns the created account together with the refreshed list.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn create_account(session: &SessionClient, draft: &AccountDraft) -> Result<AccountCreated, ApiError> {
    send_json(session, Method::Post, ACCOUNTS_ENDPOINT, draft, "Failed to create account").await
}

/// # Errors
///
/// See [`ApiError`].
pub async fn update_account(session: &SessionClient, id: &str, draft: &AccountDraft) -> Result<Account, ApiError> {
    send_json(session, Method::Put, &account_endpoint(id), draft, "Failed to update account").await
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// # Errors
///
/// See [`ApiError`].
pub async fn list_transactions(session: &SessionClient, filter: &TransactionFilter) -> Result<Vec<Transaction>, ApiError> {
    let target = format!("{TRANSACTIONS_ENDPOINT}{}", filter.query_string());
    let list: TransactionList = get_json(session, &target, "Failed to fetch transactions").await?;
    Ok(list.transactions)
}

/// The server's five most recent transactions.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn recent_transactions(session: &SessionClient) -> Result<Vec<Transaction>, ApiError> {
    let list: TransactionList =
        get_json(session, RECENT_TRANSACTIONS_ENDPOINT, "Failed to load recent transactions").await?;
    Ok(list.transactions)
}

/// Sends the draft with its amount sign normalized for its kind.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn create_transaction(session: &SessionClient, draft: TransactionDraft) -> Result<Transaction, ApiError> {
    let draft = draft.normalized();
    let created: TransactionCreated =
        send_json(session, Method::Post, TRANSACTIONS_ENDPOINT, &draft, "Failed to add transaction").await?;
    Ok(created.transaction)
}

/// # Errors
///
/// See [`ApiError`].
pub async fn update_transaction(session: &SessionClient, id: &str, update: &TransactionUpdate) -> Result<(), ApiError> {
    let options = RequestOptions::json(Method::Put, update)?;
    send(session, &transaction_endpoint(id), options, "Failed to update transaction").await?;
    Ok(())
}

/// # Errors
///
/// See [`ApiError`].
pub async fn delete_transaction(session: &SessionClient, id: &str) -> Result<(), ApiError> {
    let options = RequestOptions::new().method(Method::Delete);
    send(session, &transaction_endpoint(id), options, "Failed to delete transaction").await?;
    Ok(())
}

// =============================================================================
// CATEGORIES
// =============================================================================

/// # Errors
///
/// See [`ApiError`].
pub async fn list_categories(session: &SessionClient) -> Result<Vec<Category>, ApiError> {
    let list: CategoryList = get_json(session, CATEGORIES_ENDPOINT, "Failed to fetch categories").await?;
    Ok(list.categories)
}

// =============================================================================
// BUDGETS
// =============================================================================

/// # Errors
///
/// See [`ApiError`].
pub async fn list_budgets(session: &SessionClient, filter: &BudgetFilter) -> Result<Vec<Budget>, ApiError> {
    let target = format!("{BUDGETS_ENDPOINT}{}", filter.query_string());
    let budgets: Option<Vec<Budget>> = get_json(session, &target, "Failed to fetch budgets data").await?;
    Ok(budgets.unwrap_or_default())
}

/// # Errors
///
/// See [`ApiError`].
pub async fn create_budget(session: &SessionClient, draft: &BudgetDraft) -> Result<Budget, ApiError> {
    send_json(session, Method::Post, BUDGETS_ENDPOINT, draft, "Failed to create budget").await
}

/// # Errors
///
/// See [`ApiError`].
pub async fn delete_budget(session: &SessionClient, id: &str) -> Result<(), ApiError> {
    let options = RequestOptions::new().method(Method::Delete);
    send(session, &budget_endpoint(id), options, "Failed to delete budget").await?;
    Ok(())
}

/// # Errors
///
/// See [`ApiError`].
pub async fn budget_summary(session: &SessionClient, period: BudgetPeriod) -> Result<BudgetSummary, ApiError> {
    let target = format!("{BUDGET_SUMMARY_ENDPOINT}?period={}", period.as_str());
    get_json(session, &target, "Failed to fetch budget summary").await
}

// =============================================================================
// ANALYTICS
// =============================================================================

/// # Errors
///
/// See [`ApiError`].
pub async fn cash_flow(session: &SessionClient, period: ReportPeriod) -> Result<CashFlow, ApiError> {
    let target = analytics_endpoint("cash-flow", &format!("period={}", period.as_str()));
    get_json(session, &target, "Failed to get cash flow").await
}

/// # Errors
///
/// See [`ApiError`].
pub async fn spending_by_category(
    session: &SessionClient,
    period: ReportPeriod,
) -> Result<Vec<SpendingByCategory>, ApiError> {
    let target = analytics_endpoint("spending-by-category", &format!("period={}", period.as_str()));
    let rows: Option<Vec<SpendingByCategory>> = get_json(session, &target, "Failed to get spending by category").await?;
    Ok(rows.unwrap_or_default())
}

/// # Errors
///
/// See [`ApiError`].
pub async fn monthly_spending(session: &SessionClient, months: u32) -> Result<Vec<MonthlySpending>, ApiError> {
    let target = analytics_endpoint("monthly-spending", &format!("months={months}"));
    let rows: Option<Vec<MonthlySpending>> = get_json(session, &target, "Failed to get monthly spending").await?;
    Ok(rows.unwrap_or_default())
}

/// # Errors
///
/// See [`ApiError`].
pub async fn top_merchants(
    session: &SessionClient,
    period: ReportPeriod,
    limit: u32,
) -> Result<Vec<MerchantSpending>, ApiError> {
    let target = analytics_endpoint("top-merchants", &format!("period={}&limit={limit}", period.as_str()));
    let rows: Option<Vec<MerchantSpending>> = get_json(session, &target, "Failed to get top merchants").await?;
    Ok(rows.unwrap_or_default())
}

/// # Errors
///
/// See [`ApiError`].
pub async fn financial_report(session: &SessionClient, period: ReportPeriod) -> Result<FinancialReport, ApiError> {
    let target = analytics_endpoint("financial-report", &format!("period={}", period.as_str()));
    get_json(session, &target, "Failed to fetch analytics data").await
}

/// # Errors
///
/// See [`ApiError`].
pub async fn income_vs_expenses(session: &SessionClient, period: ReportPeriod) -> Result<IncomeVsExpenses, ApiError> {
    let target = format!("{ANALYTICS_ENDPOINT}?period={}", period.as_str());
    get_json(session, &target, "Failed to fetch analytics data").await
}

/// Fetch a single dashboard figure from `target`.
///
/// # Errors
///
/// See [`ApiError`]. Unrecognized payload shapes are not errors; they read
/// as zero.
pub async fn fetch_metric(session: &SessionClient, target: &str) -> Result<f64, ApiError> {
    let MetricValue(value) = get_json(session, target, "Failed to load metric").await?;
    Ok(value)
}
