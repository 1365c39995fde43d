//! Login page: credential submission and post-login landing.
//!
//! SYSTEM CONTEXT
//! ==============
//! A successful login stores the token and navigates to the page the user
//! was bounced from (the pending redirect), or to the default landing page.
//! Visiting login with a token already stored skips straight to the same
//! landing.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use crate::net::api;
use crate::net::session::SessionClient;

#[derive(Debug)]
pub struct LoginPage {
    session: SessionClient,
    pub error: Option<String>,
    pub busy: bool,
}

fn validate_login_input(email: &str, password: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    Ok(email.to_owned())
}

impl LoginPage {
    #[must_use]
    pub fn new(session: SessionClient) -> Self {
        Self { session, error: None, busy: false }
    }

    /// Leave for the landing page if a token is already stored. Returns
    /// whether a navigation happened.
    pub fn mount(&self) -> bool {
        if !self.session.is_authenticated() {
            return false;
        }
        let landing = self.session.take_landing();
        self.session.navigate(&landing);
        true
    }

    /// Submit credentials. On success navigates and returns the landing path.
    pub async fn submit(&mut self, email: &str, password: &str) -> Option<String> {
        let email = match validate_login_input(email, password) {
            Ok(email) => email,
            Err(message) => {
                self.error = Some(message.to_owned());
                return None;
            }
        };

        self.busy = true;
        self.error = None;
        let result = api::login(&self.session, &email, password).await;
        self.busy = false;

        match result {
            Ok(outcome) => {
                self.session.navigate(&outcome.landing);
                Some(outcome.landing)
            }
            Err(e) => {
                tracing::debug!(error = %e, "login failed");
                self.error = Some(e.user_message());
                None
            }
        }
    }
}
