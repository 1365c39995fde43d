//! Networking: transport seam, session client and typed REST calls.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` defines the request/response shapes and the `Transport`
//! trait, `session` owns credentials, `api` maps endpoints onto typed
//! results, and `types` defines the shared wire schema.

pub mod api;
#[cfg(feature = "hydrate")]
pub mod fetch_transport;
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub mod reqwest_transport;
pub mod session;
#[cfg(test)]
pub(crate) mod testing;
pub mod transport;
pub mod types;
