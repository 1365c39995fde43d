//! Analytics page: period financial report.

#[cfg(test)]
#[path = "analytics_test.rs"]
mod analytics_test;

use crate::net::api;
use crate::net::session::SessionClient;
use crate::net::types::{FinancialReport, ReportPeriod};
use crate::util::toast::ToastQueue;

const LOAD_FAILED: &str = "Failed to load analytics data";

#[derive(Debug)]
pub struct AnalyticsPage {
    session: SessionClient,
    pub period: ReportPeriod,
    pub report: Option<FinancialReport>,
    pub loading: bool,
    pub toasts: ToastQueue,
}

impl AnalyticsPage {
    #[must_use]
    pub fn new(session: SessionClient) -> Self {
        Self { session, period: ReportPeriod::default(), report: None, loading: false, toasts: ToastQueue::new() }
    }

    /// Load the report for `period`. A failed load keeps the previous report.
    pub async fn load(&mut self, period: ReportPeriod) {
        self.period = period;
        self.loading = true;
        match api::financial_report(&self.session, period).await {
            Ok(report) => self.report = Some(report),
            Err(e) => {
                tracing::warn!(error = %e, period = period.as_str(), "loading analytics failed");
                self.toasts.error(LOAD_FAILED);
            }
        }
        self.loading = false;
    }

    /// Savings rate of the loaded report as a percentage, if any.
    #[must_use]
    pub fn savings_rate(&self) -> Option<f64> {
        let cash_flow = &self.report.as_ref()?.cash_flow;
        if cash_flow.income <= 0.0 {
            return None;
        }
        Some(cash_flow.net_income / cash_flow.income * 100.0)
    }
}
