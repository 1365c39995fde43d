//! Toast notifications.
//!
//! DESIGN
//! ======
//! The queue keeps its own millisecond clock, advanced by whatever timer the
//! host has (a browser interval, a test). A toast is visible for
//! `VISIBLE_MS`, then fades for `FADE_MS`, then is dropped on the next
//! `advance`.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

pub const VISIBLE_MS: u64 = 3_000;
pub const FADE_MS: u64 = 500;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Success,
    Error,
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Fading,
    Expired,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub shown_at_ms: u64,
}

impl Toast {
    #[must_use]
    pub fn phase(&self, now_ms: u64) -> ToastPhase {
        let age = now_ms.saturating_sub(self.shown_at_ms);
        if age < VISIBLE_MS {
            ToastPhase::Visible
        } else if age < VISIBLE_MS + FADE_MS {
            ToastPhase::Fading
        } else {
            ToastPhase::Expired
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ToastQueue {
    now_ms: u64,
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`; returns the toast id.
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.next_id += 1;
        let toast = Toast { id: self.next_id, message: message.into(), kind, shown_at_ms: self.now_ms };
        tracing::debug!(id = toast.id, kind = ?toast.kind, message = %toast.message, "toast");
        self.toasts.push(toast);
        self.next_id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastKind::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastKind::Error)
    }

    /// Move the clock forward and drop expired toasts.
    pub fn advance(&mut self, delta_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
        let now = self.now_ms;
        self.toasts.retain(|t| t.phase(now) != ToastPhase::Expired);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Live toasts with their current phase, oldest first.
    pub fn active(&self) -> impl Iterator<Item = (&Toast, ToastPhase)> {
        let now = self.now_ms;
        self.toasts.iter().map(move |t| (t, t.phase(now)))
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
