//! Wire DTOs for the finance REST API.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's JSON (snake_case). Optional and joined
//! fields default when absent so older or partial payloads still decode.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// AUTH
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

// =============================================================================
// ACCOUNTS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    Credit,
    Investment,
    /// Any type this client does not know about.
    #[serde(other)]
    Other,
}

impl AccountType {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Checking => "Checking",
            Self::Savings => "Savings",
            Self::Credit => "Credit Card",
            Self::Investment => "Investment",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            "credit" => Ok(Self::Credit),
            "investment" => Ok(Self::Investment),
            other => Err(format!("unknown account type: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: AccountType,
    #[serde(default)]
    pub balance: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_currency() -> String {
    "USD".to_owned()
}

/// Create/update payload for an account.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AccountDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountType,
    pub balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AccountList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub accounts: Vec<Account>,
}

/// Response to `POST /api/accounts`: the new account plus the refreshed list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AccountCreated {
    #[serde(default)]
    pub message: Option<String>,
    pub account: Account,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub accounts: Vec<Account>,
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub category_id: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    /// `credit`/`debit` from bank sync, `income`/`expense` from manual entry.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub merchant_name: Option<String>,
    /// Joined category name.
    #[serde(default)]
    pub category: Option<String>,
    /// Joined account name.
    #[serde(default)]
    pub account: Option<String>,
}

impl Transaction {
    /// Money leaving the account.
    #[must_use]
    pub fn is_outflow(&self) -> bool {
        matches!(self.kind.as_str(), "debit" | "expense") || self.amount < 0.0
    }

    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category.as_deref().filter(|c| !c.is_empty()).unwrap_or("Uncategorized")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    #[default]
    Expense,
}

impl EntryKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// Manual transaction entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransactionDraft {
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub amount: f64,
    pub description: String,
    /// RFC 3339 timestamp.
    pub date: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl TransactionDraft {
    /// Expenses are stored as negative amounts, income as positive, whatever
    /// sign the user typed.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.amount = match self.kind {
            EntryKind::Expense => -self.amount.abs(),
            EntryKind::Income => self.amount.abs(),
        };
        self
    }
}

/// Fields editable on an existing transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TransactionUpdate {
    pub category_id: Option<String>,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TransactionList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub transactions: Vec<Transaction>,
}

/// Response to `POST /api/transactions`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TransactionCreated {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "data")]
    pub transaction: Transaction,
}

/// Query parameters accepted by `GET /api/transactions`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionFilter {
    pub account_id: Option<String>,
    /// `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`.
    pub end_date: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub kind: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl TransactionFilter {
    /// Encoded query string including the leading `?`, or empty.
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        push_opt(&mut pairs, "account_id", self.account_id.clone());
        push_opt(&mut pairs, "start_date", self.start_date.clone());
        push_opt(&mut pairs, "end_date", self.end_date.clone());
        push_opt(&mut pairs, "min_amount", self.min_amount.map(|v| v.to_string()));
        push_opt(&mut pairs, "max_amount", self.max_amount.map(|v| v.to_string()));
        push_opt(&mut pairs, "type", self.kind.clone());
        push_opt(&mut pairs, "search", self.search.clone());
        push_opt(&mut pairs, "limit", self.limit.map(|v| v.to_string()));
        push_opt(&mut pairs, "offset", self.offset.map(|v| v.to_string()));
        encode_query(&pairs)
    }
}

// =============================================================================
// CATEGORIES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// `income`, `expense` or `transfer`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CategoryList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<Category>,
}

// =============================================================================
// BUDGETS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category_id: String,
    pub amount: f64,
    pub period_start: String,
    pub period_end: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub spent_amount: Option<f64>,
    #[serde(default)]
    pub spent_percent: Option<f64>,
}

impl Budget {
    /// Unspent amount; negative when overspent. `None` until spending is known.
    #[must_use]
    pub fn remaining(&self) -> Option<f64> {
        self.spent_amount.map(|spent| self.amount - spent)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetDraft {
    pub category_id: String,
    pub amount: f64,
    /// RFC 3339 timestamp.
    pub period_start: String,
    /// RFC 3339 timestamp.
    pub period_end: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_budget: f64,
    pub total_spent: f64,
    pub remaining_budget: f64,
    pub spent_percent: f64,
}

/// Query parameters accepted by `GET /api/budgets`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BudgetFilter {
    pub category_id: Option<String>,
    /// `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

impl BudgetFilter {
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        push_opt(&mut pairs, "category_id", self.category_id.clone());
        push_opt(&mut pairs, "start_date", self.start_date.clone());
        push_opt(&mut pairs, "end_date", self.end_date.clone());
        encode_query(&pairs)
    }
}

/// Budget period names understood by `GET /api/budgets/summary`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BudgetPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(format!("unknown budget period: {other}")),
        }
    }
}

// =============================================================================
// ANALYTICS
// =============================================================================

/// Reporting window for analytics endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportPeriod {
    #[default]
    Month,
    Quarter,
    Year,
}

impl ReportPeriod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

impl std::str::FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown period: {other} (expected month, quarter or year)")),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub income: f64,
    pub expenses: f64,
    pub net_income: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendingByCategory {
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub category_name: String,
    pub amount: f64,
    #[serde(default)]
    pub percentage: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySpending {
    pub month: String,
    pub amount: f64,
    /// Percent change from the previous month.
    #[serde(default)]
    pub change: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MerchantSpending {
    pub merchant_name: String,
    pub amount: f64,
    #[serde(default)]
    pub transactions: u32,
    #[serde(default)]
    pub percentage: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialReport {
    pub period: String,
    pub cash_flow: CashFlow,
    #[serde(deserialize_with = "null_as_empty")]
    pub top_categories: Vec<SpendingByCategory>,
    #[serde(deserialize_with = "null_as_empty")]
    pub top_merchants: Vec<MerchantSpending>,
    #[serde(deserialize_with = "null_as_empty")]
    pub monthly_trend: Vec<MonthlySpending>,
    pub average_daily_spend: f64,
    pub largest_expense: Option<Transaction>,
    pub avg_monthly_income: f64,
    pub avg_monthly_expenses: f64,
    pub min_monthly_expenses: f64,
    pub max_monthly_expenses: f64,
    pub savings_rate: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub source: String,
    pub amount: f64,
    #[serde(default)]
    pub percentage: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub percentage: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeVsExpenses {
    pub period: String,
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_amount: f64,
    #[serde(deserialize_with = "null_as_empty")]
    pub income_breakdown: Vec<IncomeSource>,
    #[serde(deserialize_with = "null_as_empty")]
    pub expense_breakdown: Vec<ExpenseShare>,
}

/// A single dashboard figure.
///
/// Metric endpoints answer with a bare number (`1234.5`) or an object
/// carrying `value` or `amount`. Anything else decodes as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MetricValue(pub f64);

impl<'de> Deserialize<'de> for MetricValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self(metric_from_value(&value)))
    }
}

fn metric_from_value(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::Object(map) => map
            .get("value")
            .filter(|v| !v.is_null())
            .or_else(|| map.get("amount"))
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn push_opt(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        pairs.push((key, value));
    }
}

fn encode_query(pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let joined = pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("?{joined}")
}

/// The backend encodes empty Go slices as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Option::<Vec<T>>::deserialize(deserializer).map_err(D::Error::custom)?;
    Ok(value.unwrap_or_default())
}
