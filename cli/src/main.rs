
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use client::config::{ClientConfig, ConfigError};
use client::net::api::{self, ApiError};
use client::net::reqwest_transport::ReqwestTransport;
use client::net::transport::TransportError;
use client::net::types::{
    AccountDraft, AccountType, BudgetDraft, BudgetFilter, BudgetPeriod, EntryKind, ReportPeriod, TransactionDraft,
    TransactionFilter,
};
use client::pages::dashboard::DashboardPage;
use client::state::session::SessionState;
use client::state::store::{FileStore, MemoryStore};
use client::util::currency::format_currency;
use client::util::date::{end_of_day, format_date, parse_date, start_of_day, today};
use client::util::nav::HeadlessNavigator;
use client::SessionClient;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Path the headless session reports as "current" when it records a
/// pending redirect.
const CLI_PAGE: &str = "/";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not logged in")]
    NotLoggedIn,
    #[error("server unreachable")]
    Unreachable,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("{0}")]
    Api(String),
    #[error("invalid date `{0}`; expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("output encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthenticated => Self::NotLoggedIn,
            ApiError::Unavailable => Self::Unreachable,
            ApiError::Transport(e) => Self::Transport(e),
            other => Self::Api(other.user_message()),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pfm", about = "Personal finance manager client")]
struct Cli {
    #[arg(long, env = "PFM_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "PFM_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PFM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session token.
    Logout,
    /// Report whether a session token is stored.
    Status,
    Accounts(AccountsCommand),
    Transactions(TransactionsCommand),
    Categories,
    Budgets(BudgetsCommand),
    /// Headline metrics and recent activity.
    Dashboard,
    Analytics(AnalyticsCommand),
}

#[derive(Args, Debug)]
struct AccountsCommand {
    #[command(subcommand)]
    command: AccountsSubcommand,
}

#[derive(Subcommand, Debug)]
enum AccountsSubcommand {
    List,
    Show {
        account_id: String,
    },
    Create(AccountArgs),
    Update {
        account_id: String,
        #[command(flatten)]
        account: AccountArgs,
    },
}

#[derive(Args, Debug)]
struct AccountArgs {
    #[arg(long)]
    name: String,
    #[arg(long = "type", default_value = "checking")]
    kind: AccountType,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    balance: f64,
    #[arg(long)]
    currency: Option<String>,
}

#[derive(Args, Debug)]
struct TransactionsCommand {
    #[command(subcommand)]
    command: TransactionsSubcommand,
}

#[derive(Subcommand, Debug)]
enum TransactionsSubcommand {
    List(ListTransactionsArgs),
    Recent,
    Add(AddTransactionArgs),
    Delete { transaction_id: String },
}

#[derive(Args, Debug)]
struct ListTransactionsArgs {
    #[arg(long)]
    account_id: Option<String>,
    #[arg(long)]
    start_date: Option<String>,
    #[arg(long)]
    end_date: Option<String>,
    #[arg(long = "type")]
    kind: Option<String>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long)]
    offset: Option<u32>,
}

#[derive(Args, Debug)]
struct AddTransactionArgs {
    #[arg(long)]
    account_id: String,
    #[arg(long, allow_negative_numbers = true)]
    amount: f64,
    #[arg(long)]
    description: String,
    #[arg(long)]
    category_id: Option<String>,
    /// `YYYY-MM-DD`; defaults to today.
    #[arg(long)]
    date: Option<String>,
    /// Record as income instead of an expense.
    #[arg(long, default_value_t = false)]
    income: bool,
}

#[derive(Args, Debug)]
struct BudgetsCommand {
    #[command(subcommand)]
    command: BudgetsSubcommand,
}

#[derive(Subcommand, Debug)]
enum BudgetsSubcommand {
    List {
        #[arg(long)]
        category_id: Option<String>,
    },
    Create {
        #[arg(long)]
        category_id: String,
        #[arg(long)]
        amount: f64,
        /// First day of the period, `YYYY-MM-DD`.
        #[arg(long)]
        start: String,
        /// Last day of the period, `YYYY-MM-DD`.
        #[arg(long)]
        end: String,
    },
    Delete {
        budget_id: String,
    },
    Summary {
        #[arg(long, default_value = "monthly")]
        period: BudgetPeriod,
    },
}

#[derive(Args, Debug)]
struct AnalyticsCommand {
    #[command(subcommand)]
    command: AnalyticsSubcommand,
}

#[derive(Subcommand, Debug)]
enum AnalyticsSubcommand {
    Report {
        #[arg(long, default_value = "month")]
        period: ReportPeriod,
    },
    CashFlow {
        #[arg(long, default_value = "month")]
        period: ReportPeriod,
    },
    Spending {
        #[arg(long, default_value = "month")]
        period: ReportPeriod,
    },
    Monthly {
        #[arg(long, default_value_t = 12)]
        months: u32,
    },
    Merchants {
        #[arg(long, default_value = "month")]
        period: ReportPeriod,
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
    IncomeVsExpenses {
        #[arg(long, default_value = "month")]
        period: ReportPeriod,
    },
}

fn parse_day(raw: &str) -> Result<time::Date, CliError> {
    parse_date(raw).ok_or_else(|| CliError::InvalidDate(raw.to_owned()))
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring .env: {e}");
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    let base_url = cli.base_url.clone();
    let session_file = cli.session_file.as_ref().map(|p| p.display().to_string());
    ClientConfig::from_lookup(|key| match key {
        "PFM_BASE_URL" => base_url.clone(),
        "PFM_SESSION_FILE" => session_file.clone(),
        _ => std::env::var(key).ok(),
    })
}

fn build_session(config: &ClientConfig) -> Result<SessionClient, CliError> {
    let transport = ReqwestTransport::new(&config.base_url, config.timeouts)?;
    let state = SessionState::new(Arc::new(FileStore::open(config.session_file.clone())), Arc::new(MemoryStore::new()));
    tracing::debug!(base_url = %config.base_url, session_file = %config.session_file.display(), "session ready");
    Ok(SessionClient::new(state, Arc::new(transport), Arc::new(HeadlessNavigator::at(CLI_PAGE)), config.session.clone()))
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let session = build_session(&config)?;

    match cli.command {
        Command::Login { email, password } => {
            let outcome = api::login(&session, &email, &password).await?;
            println!("logged in as {}", display_user(&outcome.user.email, &outcome.user.id));
            Ok(())
        }
        Command::Logout => {
            session.logout();
            println!("logged out");
            Ok(())
        }
        Command::Status => {
            if session.is_authenticated() {
                println!("logged in ({})", config.session_file.display());
            } else {
                println!("not logged in");
            }
            Ok(())
        }
        Command::Accounts(accounts) => run_accounts(&session, accounts).await,
        Command::Transactions(transactions) => run_transactions(&session, transactions).await,
        Command::Categories => print_json(&api::list_categories(&session).await?),
        Command::Budgets(budgets) => run_budgets(&session, budgets).await,
        Command::Dashboard => run_dashboard(&session).await,
        Command::Analytics(analytics) => run_analytics(&session, analytics).await,
    }
}

fn display_user<'a>(email: &'a str, id: &'a str) -> &'a str {
    if email.is_empty() { id } else { email }
}

async fn run_accounts(session: &SessionClient, accounts: AccountsCommand) -> Result<(), CliError> {
    match accounts.command {
        AccountsSubcommand::List => print_json(&api::list_accounts(session).await?),
        AccountsSubcommand::Show { account_id } => print_json(&api::get_account(session, &account_id).await?),
        AccountsSubcommand::Create(account) => {
            let created = api::create_account(session, &account_draft(account)).await?;
            print_json(&created.account)
        }
        AccountsSubcommand::Update { account_id, account } => {
            print_json(&api::update_account(session, &account_id, &account_draft(account)).await?)
        }
    }
}

fn account_draft(args: AccountArgs) -> AccountDraft {
    AccountDraft { name: args.name, kind: args.kind, balance: args.balance, currency: args.currency }
}

async fn run_transactions(session: &SessionClient, transactions: TransactionsCommand) -> Result<(), CliError> {
    match transactions.command {
        TransactionsSubcommand::List(args) => {
            let filter = TransactionFilter {
                account_id: args.account_id,
                start_date: args.start_date,
                end_date: args.end_date,
                kind: args.kind,
                search: args.search,
                limit: args.limit,
                offset: args.offset,
                ..TransactionFilter::default()
            };
            print_json(&api::list_transactions(session, &filter).await?)
        }
        TransactionsSubcommand::Recent => print_json(&api::recent_transactions(session).await?),
        TransactionsSubcommand::Add(args) => {
            let day = match args.date.as_deref() {
                Some(raw) => parse_day(raw)?,
                None => today(),
            };
            let draft = TransactionDraft {
                account_id: args.account_id,
                category_id: args.category_id,
                amount: args.amount,
                description: args.description,
                date: start_of_day(day),
                kind: if args.income { EntryKind::Income } else { EntryKind::Expense },
            };
            print_json(&api::create_transaction(session, draft).await?)
        }
        TransactionsSubcommand::Delete { transaction_id } => {
            api::delete_transaction(session, &transaction_id).await?;
            println!("deleted {transaction_id}");
            Ok(())
        }
    }
}

async fn run_budgets(session: &SessionClient, budgets: BudgetsCommand) -> Result<(), CliError> {
    match budgets.command {
        BudgetsSubcommand::List { category_id } => {
            let filter = BudgetFilter { category_id, ..BudgetFilter::default() };
            print_json(&api::list_budgets(session, &filter).await?)
        }
        BudgetsSubcommand::Create { category_id, amount, start, end } => {
            let draft = BudgetDraft {
                category_id,
                amount,
                period_start: start_of_day(parse_day(&start)?),
                period_end: end_of_day(parse_day(&end)?),
            };
            print_json(&api::create_budget(session, &draft).await?)
        }
        BudgetsSubcommand::Delete { budget_id } => {
            api::delete_budget(session, &budget_id).await?;
            println!("deleted {budget_id}");
            Ok(())
        }
        BudgetsSubcommand::Summary { period } => print_json(&api::budget_summary(session, period).await?),
    }
}

async fn run_dashboard(session: &SessionClient) -> Result<(), CliError> {
    let mut page = DashboardPage::new(session.clone());
    page.load().await;
    if !session.is_authenticated() {
        return Err(CliError::NotLoggedIn);
    }

    for metric in &page.metrics {
        println!("{:<18} {:>14}", metric.key, metric.display());
    }
    if let Some(error) = &page.recent.error {
        eprintln!("recent transactions unavailable: {error}");
        return Ok(());
    }
    println!();
    for txn in &page.recent.items {
        println!(
            "{:<14} {:<32} {:>12}  {}",
            format_date(&txn.date),
            txn.description,
            format_currency(txn.amount),
            txn.category_label()
        );
    }
    Ok(())
}

async fn run_analytics(session: &SessionClient, analytics: AnalyticsCommand) -> Result<(), CliError> {
    match analytics.command {
        AnalyticsSubcommand::Report { period } => print_json(&api::financial_report(session, period).await?),
        AnalyticsSubcommand::CashFlow { period } => print_json(&api::cash_flow(session, period).await?),
        AnalyticsSubcommand::Spending { period } => print_json(&api::spending_by_category(session, period).await?),
        AnalyticsSubcommand::Monthly { months } => print_json(&api::monthly_spending(session, months).await?),
        AnalyticsSubcommand::Merchants { period, limit } => {
            print_json(&api::top_merchants(session, period, limit).await?)
        }
        AnalyticsSubcommand::IncomeVsExpenses { period } => {
            print_json(&api::income_vs_expenses(session, period).await?)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
