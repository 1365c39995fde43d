//! Browser wiring: the session client as the hydrated app constructs it.

use std::sync::Arc;

use crate::config::SessionConfig;
use crate::net::fetch_transport::FetchTransport;
use crate::net::session::SessionClient;
use crate::state::browser_store::{LocalStorageStore, SessionStorageStore};
use crate::state::session::SessionState;
use crate::util::nav::LocationNavigator;

/// Session backed by `localStorage` (token), `sessionStorage` (pending
/// redirect), same-origin `fetch` and `window.location`.
#[must_use]
pub fn browser_session(config: SessionConfig) -> SessionClient {
    let state = SessionState::new(Arc::new(LocalStorageStore), Arc::new(SessionStorageStore));
    SessionClient::new(state, Arc::new(FetchTransport), Arc::new(LocationNavigator), config)
}
