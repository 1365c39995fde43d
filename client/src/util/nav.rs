//! Page navigation seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session client redirects to the login page when credentials are
//! missing or rejected. In the browser that is a `window.location` change;
//! headless callers (CLI, tests) record the navigation instead.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::sync::{Mutex, PoisonError};

/// Reads the current page path and performs navigations.
pub trait Navigator: Send + Sync {
    /// Path of the page currently shown, e.g. `/dashboard`.
    fn current_path(&self) -> String;

    /// Leave the current page for `path`.
    fn navigate(&self, path: &str);
}

/// Navigator without a page: tracks the current path and every navigation.
#[derive(Debug, Default)]
pub struct HeadlessNavigator {
    inner: Mutex<HeadlessInner>,
}

#[derive(Debug, Default)]
struct HeadlessInner {
    current: String,
    history: Vec<String>,
}

impl HeadlessNavigator {
    /// Start on `path`.
    #[must_use]
    pub fn at(path: &str) -> Self {
        Self { inner: Mutex::new(HeadlessInner { current: path.to_owned(), history: Vec::new() }) }
    }

    /// Every navigation performed so far, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).history.clone()
    }

    #[must_use]
    pub fn last_navigation(&self) -> Option<String> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).history.last().cloned()
    }
}

impl Navigator for HeadlessNavigator {
    fn current_path(&self) -> String {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).current.clone()
    }

    fn navigate(&self, path: &str) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.current = path.to_owned();
        inner.history.push(path.to_owned());
    }
}

/// `window.location`-backed navigator.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocationNavigator;

#[cfg(feature = "hydrate")]
impl Navigator for LocationNavigator {
    fn current_path(&self) -> String {
        let Some(window) = web_sys::window() else {
            return "/".to_owned();
        };
        window.location().pathname().unwrap_or_else(|_| "/".to_owned())
    }

    fn navigate(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if window.location().set_href(path).is_err() {
            tracing::warn!(path, "navigation rejected by browser");
        }
    }
}
