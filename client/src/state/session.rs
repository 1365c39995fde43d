//! Canonical session storage: the bearer token and the pending redirect.
//!
//! DESIGN
//! ======
//! The token lives under exactly one key in exactly one durable store; the
//! pending redirect lives under exactly one key in one session-scoped store.
//! Nothing else in the crate reads or writes either value directly.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::sync::Arc;

use super::store::{KeyValueStore, MemoryStore};

/// Durable-store key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Session-store key for the page to return to after login.
pub const REDIRECT_KEY: &str = "redirectUrl";

/// Opaque bearer credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token string. Blank input yields `None`.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() { None } else { Some(Self(raw)) }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Session storage owned by a single `SessionClient`.
#[derive(Clone)]
pub struct SessionState {
    durable: Arc<dyn KeyValueStore>,
    scratch: Arc<dyn KeyValueStore>,
}

impl SessionState {
    #[must_use]
    pub fn new(durable: Arc<dyn KeyValueStore>, scratch: Arc<dyn KeyValueStore>) -> Self {
        Self { durable, scratch }
    }

    /// Fully in-memory session; nothing survives the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.durable.get(TOKEN_KEY).and_then(Token::new)
    }

    pub fn set_token(&self, token: &Token) {
        self.durable.set(TOKEN_KEY, token.as_str());
    }

    pub fn clear_token(&self) {
        self.durable.remove(TOKEN_KEY);
    }

    pub fn set_pending_redirect(&self, path: &str) {
        self.scratch.set(REDIRECT_KEY, path);
    }

    #[must_use]
    pub fn pending_redirect(&self) -> Option<String> {
        self.scratch.get(REDIRECT_KEY)
    }

    /// Read the pending redirect and remove it in one step.
    pub fn take_pending_redirect(&self) -> Option<String> {
        let value = self.scratch.get(REDIRECT_KEY);
        if value.is_some() {
            self.scratch.remove(REDIRECT_KEY);
        }
        value
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("authenticated", &self.token().is_some())
            .field("pending_redirect", &self.pending_redirect())
            .finish()
    }
}
