//! Dashboard: headline metrics and recent activity.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. The four metrics load
//! concurrently and each falls back to zero on its own; recent transactions
//! load after them. If the session turns out to be signed out, the page
//! sends the user to login instead of showing zeros.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use futures::future::join_all;

use crate::net::api::{self, ApiError};
use crate::net::session::SessionClient;
use crate::net::types::Transaction;
use crate::state::list::ListState;
use crate::util::currency::format_currency;

/// `(key, endpoint)` for each headline figure, in display order.
pub const METRICS: [(&str, &str); 4] = [
    ("net-worth", "/api/metrics?type=net_worth"),
    ("monthly-income", "/api/analytics/income?period=month"),
    ("monthly-expenses", "/api/analytics/expenses?period=month"),
    ("monthly-savings", "/api/analytics/savings?period=month"),
];

#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    pub key: &'static str,
    pub value: f64,
}

impl Metric {
    #[must_use]
    pub fn display(&self) -> String {
        format_currency(self.value)
    }
}

#[derive(Debug)]
pub struct DashboardPage {
    session: SessionClient,
    pub metrics: Vec<Metric>,
    pub recent: ListState<Transaction>,
}

impl DashboardPage {
    #[must_use]
    pub fn new(session: SessionClient) -> Self {
        let metrics = METRICS.iter().map(|&(key, _)| Metric { key, value: 0.0 }).collect();
        Self { session, metrics, recent: ListState::default() }
    }

    pub async fn load(&mut self) {
        let results = join_all(METRICS.iter().map(|&(_, target)| api::fetch_metric(&self.session, target))).await;

        let mut signed_out = false;
        for (metric, result) in self.metrics.iter_mut().zip(results) {
            metric.value = match result {
                Ok(value) => value,
                Err(e) => {
                    signed_out |= matches!(e, ApiError::Unauthenticated);
                    tracing::debug!(metric = metric.key, error = %e, "metric unavailable");
                    0.0
                }
            };
        }

        if signed_out {
            self.session.redirect_to_login();
            return;
        }

        self.recent.begin_load();
        match api::recent_transactions(&self.session).await {
            Ok(items) => self.recent.finish(items),
            Err(e) => {
                tracing::warn!(error = %e, "loading recent transactions failed");
                self.recent.fail(e.user_message());
            }
        }
    }

    #[must_use]
    pub fn metric(&self, key: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.key == key)
    }
}
