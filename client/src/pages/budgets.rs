//! Budgets page: per-category spending limits for a period.

#[cfg(test)]
#[path = "budgets_test.rs"]
mod budgets_test;

use crate::net::api;
use crate::net::session::SessionClient;
use crate::net::types::{Budget, BudgetDraft, BudgetFilter, BudgetPeriod, BudgetSummary, Category};
use crate::state::list::ListState;
use crate::util::toast::ToastQueue;

const LOAD_FAILED: &str = "Failed to load budgets data";
const CREATED: &str = "Budget created successfully";
const CREATE_FAILED: &str = "Failed to create budget";

#[derive(Debug)]
pub struct BudgetsPage {
    session: SessionClient,
    pub filter: BudgetFilter,
    pub period: BudgetPeriod,
    pub budgets: ListState<Budget>,
    pub categories: ListState<Category>,
    /// Totals for `period`; `None` until loaded or when the summary failed.
    pub summary: Option<BudgetSummary>,
    pub toasts: ToastQueue,
}

impl BudgetsPage {
    #[must_use]
    pub fn new(session: SessionClient) -> Self {
        Self {
            session,
            filter: BudgetFilter::default(),
            period: BudgetPeriod::default(),
            budgets: ListState::default(),
            categories: ListState::default(),
            summary: None,
            toasts: ToastQueue::new(),
        }
    }

    pub async fn load(&mut self) {
        self.budgets.begin_load();
        self.categories.begin_load();

        let (budgets, categories, summary) = futures::join!(
            api::list_budgets(&self.session, &self.filter),
            api::list_categories(&self.session),
            api::budget_summary(&self.session, self.period),
        );

        match budgets {
            Ok(items) => self.budgets.finish(items),
            Err(e) => {
                tracing::warn!(error = %e, "loading budgets failed");
                self.budgets.fail(e.user_message());
                self.toasts.error(LOAD_FAILED);
            }
        }
        match categories {
            Ok(items) => self.categories.finish(items),
            Err(e) => self.categories.fail(e.user_message()),
        }
        self.summary = summary
            .inspect_err(|e| tracing::debug!(error = %e, "budget summary unavailable"))
            .ok();
    }

    pub async fn create(&mut self, draft: &BudgetDraft) -> bool {
        match api::create_budget(&self.session, draft).await {
            Ok(budget) => {
                tracing::debug!(id = %budget.id, "budget created");
                self.toasts.success(CREATED);
                self.load().await;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "creating budget failed");
                self.toasts.error(CREATE_FAILED);
                false
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        match api::delete_budget(&self.session, id).await {
            Ok(()) => {
                self.load().await;
                true
            }
            Err(e) => {
                self.toasts.error(e.user_message());
                false
            }
        }
    }

    /// Budgets whose recorded spending exceeds their amount.
    pub fn overspent(&self) -> impl Iterator<Item = &Budget> {
        self.budgets.items.iter().filter(|b| b.remaining().is_some_and(|r| r < 0.0))
    }
}
