//! Utility helpers shared across page loaders.
//!
//! SYSTEM CONTEXT
//! ==============
//! One definition each for the formatting and notification helpers every
//! page needs, plus the navigation seam used by the session client.

pub mod currency;
pub mod date;
pub mod nav;
pub mod toast;
