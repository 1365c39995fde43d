//! Browser `localStorage`/`sessionStorage` backends.
//!
//! SYSTEM CONTEXT
//! ==============
//! The durable token goes to `localStorage`; the pending redirect goes to
//! `sessionStorage` so it dies with the tab. Storage can be unavailable
//! (private mode, sandboxed iframes); reads then return `None` and writes
//! are logged.

use web_sys::Storage;

use super::store::KeyValueStore;

#[derive(Clone, Copy, Debug)]
enum Area {
    Local,
    Session,
}

fn storage(area: Area) -> Option<Storage> {
    let window = web_sys::window()?;
    let result = match area {
        Area::Local => window.local_storage(),
        Area::Session => window.session_storage(),
    };
    result.unwrap_or(None)
}

fn get(area: Area, key: &str) -> Option<String> {
    storage(area)?.get_item(key).unwrap_or(None)
}

fn set(area: Area, key: &str, value: &str) {
    let Some(storage) = storage(area) else {
        tracing::warn!(?area, key, "browser storage unavailable");
        return;
    };
    if storage.set_item(key, value).is_err() {
        tracing::warn!(?area, key, "browser storage write rejected");
    }
}

fn remove(area: Area, key: &str) {
    if let Some(storage) = storage(area) {
        if storage.remove_item(key).is_err() {
            tracing::warn!(?area, key, "browser storage remove rejected");
        }
    }
}

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        get(Area::Local, key)
    }

    fn set(&self, key: &str, value: &str) {
        set(Area::Local, key, value);
    }

    fn remove(&self, key: &str) {
        remove(Area::Local, key);
    }
}

/// `window.sessionStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionStorageStore;

impl KeyValueStore for SessionStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        get(Area::Session, key)
    }

    fn set(&self, key: &str, value: &str) {
        set(Area::Session, key, value);
    }

    fn remove(&self, key: &str) {
        remove(Area::Session, key);
    }
}
