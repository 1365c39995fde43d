//! # pfm-client
//!
//! Client-side data and session layer for the personal-finance web app.
//!
//! This crate owns the authenticated-request path (`net::session`), the
//! single canonical session store (`state`), typed REST loaders (`net::api`),
//! page-level loaders that produce view state (`pages`), and the shared
//! formatting/notification helpers (`util`).
//!
//! Browser backends (storage, navigation, fetch) live behind the `hydrate`
//! feature; the `native` feature provides a `reqwest` transport for
//! non-wasm targets. Neither is on by default.

#[cfg(feature = "hydrate")]
pub mod browser;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

pub use net::session::SessionClient;
