//! Page loaders for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its view state (`ListState`s, a `ToastQueue`) and a clone
//! of the shared `SessionClient`. Loaders call `net::api` and translate
//! outcomes into state; rendering is left to the host.

pub mod accounts;
pub mod analytics;
pub mod budgets;
pub mod dashboard;
pub mod login;
pub mod transactions;
