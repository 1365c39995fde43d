//! Client-side state: session storage and page view state.
//!
//! DESIGN
//! ======
//! `session` is the only owner of credentials; `store` supplies the backends
//! it persists through. `list` holds transient per-page collections.

#[cfg(feature = "hydrate")]
pub mod browser_store;
pub mod list;
pub mod session;
pub mod store;
