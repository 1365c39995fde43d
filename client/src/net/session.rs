//! Session client: the one path by which requests get credentials.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page loader receives a `SessionClient` and issues its data calls
//! through `authenticated_request`. The client owns the token lifecycle:
//! read before each request, attach as a bearer header, clear on a 401, and
//! send the user to the login page when a *page* target lacks credentials.
//! API targets never navigate; they return `None` so background work can
//! degrade in place.
//!
//! ERROR HANDLING
//! ==============
//! Missing token, rejected token and network failure are expected outcomes
//! and come back as `Ok(None)`. Only a request the transport cannot even
//! construct surfaces as `Err`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use serde::Serialize;

use super::transport::{Credentials, Headers, HttpRequest, HttpResponse, Method, Transport, TransportError};
use crate::config::SessionConfig;
use crate::state::session::{SessionState, Token};
use crate::util::nav::Navigator;

const UNAUTHORIZED: u16 = 401;

/// Caller overrides for a single request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<String>,
    pub headers: Headers,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// `method` with `value` serialized as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns the serde error if `value` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(method: Method, value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new().method(method).body(serde_json::to_string(value)?))
    }
}

/// Injectable session object. Cheap to clone; clones share storage,
/// transport and navigator.
#[derive(Clone)]
pub struct SessionClient {
    state: SessionState,
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
    config: SessionConfig,
}

impl SessionClient {
    #[must_use]
    pub fn new(
        state: SessionState,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
        config: SessionConfig,
    ) -> Self {
        Self { state, transport, navigator, config }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn get_token(&self) -> Option<Token> {
        self.state.token()
    }

    /// Local presence check only; says nothing about expiry.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    pub fn clear_token(&self) {
        self.state.clear_token();
    }

    pub fn store_token(&self, token: &Token) {
        self.state.set_token(token);
    }

    /// Clear the token and leave for the login page.
    pub fn logout(&self) {
        self.clear_token();
        tracing::info!(login = %self.config.login_path, "logged out");
        self.navigator.navigate(&self.config.login_path);
    }

    /// Persist a freshly issued token and return where the user should land:
    /// the pending redirect if one was recorded (consumed here), otherwise
    /// the default landing page.
    pub fn complete_login(&self, token: &Token) -> String {
        self.store_token(token);
        self.take_landing()
    }

    /// Consume the pending redirect, falling back to the default landing page.
    #[must_use]
    pub fn take_landing(&self) -> String {
        self.state
            .take_pending_redirect()
            .unwrap_or_else(|| self.config.default_landing.clone())
    }

    #[must_use]
    pub fn is_api_target(&self, target: &str) -> bool {
        self.config.is_api_target(target)
    }

    /// Issue `target` with the session's bearer token attached.
    ///
    /// Returns `Ok(None)` when there is no token, when the server rejects
    /// the token (401, token is cleared), or when no response arrives. Page
    /// targets additionally record the current path and navigate to login in
    /// the first two cases. Every other response, success or not, is
    /// returned untouched.
    ///
    /// # Errors
    ///
    /// Propagates [`TransportError::InvalidRequest`] and
    /// [`TransportError::ClientBuild`]: the request itself was malformed.
    pub async fn authenticated_request(
        &self,
        target: &str,
        options: RequestOptions,
    ) -> Result<Option<HttpResponse>, TransportError> {
        let Some(token) = self.get_token() else {
            tracing::debug!(%target, "no session token");
            self.redirect_unless_api(target);
            return Ok(None);
        };

        let request = self.build_request(target, Some(&token), options);
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(TransportError::Network(e)) => {
                tracing::warn!(%target, error = %e, "request failed");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if response.status == UNAUTHORIZED {
            tracing::debug!(%target, "session token rejected");
            self.clear_token();
            self.redirect_unless_api(target);
            return Ok(None);
        }

        Ok(Some(response))
    }

    /// Issue `target` without credentials (login, registration).
    ///
    /// # Errors
    ///
    /// Returns any [`TransportError`], including network failure.
    pub async fn public_request(&self, target: &str, options: RequestOptions) -> Result<HttpResponse, TransportError> {
        let request = self.build_request(target, None, options);
        self.transport.send(request).await
    }

    /// Remember the current page as the pending redirect and go to login.
    pub fn redirect_to_login(&self) {
        let current = self.navigator.current_path();
        tracing::debug!(from = %current, login = %self.config.login_path, "redirecting to login");
        self.state.set_pending_redirect(&current);
        self.navigator.navigate(&self.config.login_path);
    }

    pub fn navigate(&self, path: &str) {
        self.navigator.navigate(path);
    }

    fn redirect_unless_api(&self, target: &str) {
        if !self.is_api_target(target) {
            self.redirect_to_login();
        }
    }

    fn build_request(&self, target: &str, token: Option<&Token>, options: RequestOptions) -> HttpRequest {
        let mut headers = Headers::new();
        if let Some(token) = token {
            headers.insert("Authorization", &token.bearer());
        }
        headers.insert("Content-Type", "application/json");
        for (name, value) in options.headers.iter() {
            headers.insert(name, value);
        }
        HttpRequest {
            method: options.method,
            path: target.to_owned(),
            headers,
            body: options.body,
            credentials: Credentials::Include,
        }
    }
}

impl std::fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
