//! Transactions page: filterable ledger with manual entry and deletion.
//!
//! SYSTEM CONTEXT
//! ==============
//! The entry form needs the user's accounts and categories, so `load` pulls
//! all three collections concurrently over the shared session.

#[cfg(test)]
#[path = "transactions_test.rs"]
mod transactions_test;

use crate::net::api;
use crate::net::session::SessionClient;
use crate::net::types::{Account, Category, Transaction, TransactionDraft, TransactionFilter};
use crate::state::list::ListState;
use crate::util::toast::ToastQueue;

const ADDED: &str = "Transaction added successfully";
const DELETED: &str = "Transaction deleted successfully";

#[derive(Debug)]
pub struct TransactionsPage {
    session: SessionClient,
    pub filter: TransactionFilter,
    pub transactions: ListState<Transaction>,
    pub accounts: ListState<Account>,
    pub categories: ListState<Category>,
    pub toasts: ToastQueue,
}

impl TransactionsPage {
    #[must_use]
    pub fn new(session: SessionClient) -> Self {
        Self {
            session,
            filter: TransactionFilter::default(),
            transactions: ListState::default(),
            accounts: ListState::default(),
            categories: ListState::default(),
            toasts: ToastQueue::new(),
        }
    }

    pub async fn load(&mut self) {
        self.transactions.begin_load();
        self.accounts.begin_load();
        self.categories.begin_load();

        let (transactions, accounts, categories) = futures::join!(
            api::list_transactions(&self.session, &self.filter),
            api::list_accounts(&self.session),
            api::list_categories(&self.session),
        );

        match transactions {
            Ok(items) => self.transactions.finish(items),
            Err(e) => {
                self.transactions.fail(e.user_message());
                self.toasts.error(e.user_message());
            }
        }
        match accounts {
            Ok(items) => self.accounts.finish(items),
            Err(e) => self.accounts.fail(e.user_message()),
        }
        match categories {
            Ok(items) => self.categories.finish(items),
            Err(e) => self.categories.fail(e.user_message()),
        }
    }

    /// Reload only the ledger, e.g. after a mutation or a filter change.
    pub async fn refresh(&mut self) {
        self.transactions.begin_load();
        match api::list_transactions(&self.session, &self.filter).await {
            Ok(items) => self.transactions.finish(items),
            Err(e) => {
                tracing::warn!(error = %e, "refreshing transactions failed");
                self.transactions.fail(e.user_message());
            }
        }
    }

    /// Submit a manual entry. Expense amounts are sent negative regardless of
    /// the sign entered.
    pub async fn add(&mut self, draft: TransactionDraft) -> bool {
        match api::create_transaction(&self.session, draft).await {
            Ok(created) => {
                tracing::debug!(id = %created.id, "transaction added");
                self.toasts.success(ADDED);
                self.refresh().await;
                true
            }
            Err(e) => {
                self.toasts.error(e.user_message());
                false
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        match api::delete_transaction(&self.session, id).await {
            Ok(()) => {
                self.toasts.success(DELETED);
                self.refresh().await;
                true
            }
            Err(e) => {
                self.toasts.error(e.user_message());
                false
            }
        }
    }

    /// Display name of an account id, falling back to the id itself.
    #[must_use]
    pub fn account_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.accounts.items.iter().find(|a| a.id == id).map_or(id, |a| a.name.as_str())
    }
}
