//! Accounts page: list, create and edit accounts.

#[cfg(test)]
#[path = "accounts_test.rs"]
mod accounts_test;

use crate::net::api;
use crate::net::session::SessionClient;
use crate::net::types::{Account, AccountDraft};
use crate::state::list::ListState;
use crate::util::toast::ToastQueue;

const LOAD_FAILED: &str = "Failed to load accounts. Please try again.";
const CREATED: &str = "Account created successfully";
const UPDATED: &str = "Account updated successfully";
const SAVE_FAILED: &str = "Error saving account";

#[derive(Debug)]
pub struct AccountsPage {
    session: SessionClient,
    pub accounts: ListState<Account>,
    pub toasts: ToastQueue,
}

impl AccountsPage {
    #[must_use]
    pub fn new(session: SessionClient) -> Self {
        Self { session, accounts: ListState::default(), toasts: ToastQueue::new() }
    }

    pub async fn load(&mut self) {
        self.accounts.begin_load();
        match api::list_accounts(&self.session).await {
            Ok(accounts) => self.accounts.finish(accounts),
            Err(e) => {
                tracing::warn!(error = %e, "loading accounts failed");
                self.accounts.fail(e.user_message());
                self.toasts.error(LOAD_FAILED);
            }
        }
    }

    /// Create (`id` is `None`) or update an account, then refresh the list.
    /// Returns whether the save succeeded.
    pub async fn save(&mut self, id: Option<&str>, draft: &AccountDraft) -> bool {
        let result = match id {
            None => api::create_account(&self.session, draft).await.map(|_| CREATED),
            Some(id) => api::update_account(&self.session, id, draft).await.map(|_| UPDATED),
        };

        match result {
            Ok(message) => {
                self.toasts.success(message);
                self.load().await;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, account = ?id, "saving account failed");
                self.toasts.error(SAVE_FAILED);
                false
            }
        }
    }

    #[must_use]
    pub fn total_balance(&self) -> f64 {
        self.accounts.items.iter().map(|a| a.balance).sum()
    }
}
