//! Toast notification queue.
//!
//! DESIGN
//! ======
//! A toast lives through two timed phases: visible for `duration_ms`, then
//! `leaving` for `EXIT_ANIMATION_MS` while the exit transition plays, then it
//! is removed. A zero duration pins the toast until dismissed. Timers are
//! owned by `components::toast_host`; this module only holds the queue.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

/// Default visible time for a toast.
pub const DEFAULT_DURATION_MS: u32 = 5_000;
/// Length of the exit transition before the toast is removed.
pub const EXIT_ANIMATION_MS: u32 = 350;
/// Oldest toasts are dropped past this many.
pub const MAX_VISIBLE: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Error => "toast--error",
            Self::Warning => "toast--warning",
            Self::Info => "toast--info",
        }
    }

    /// ARIA role: errors and warnings interrupt, the rest are polite.
    pub fn aria_role(self) -> &'static str {
        match self {
            Self::Error | Self::Warning => "alert",
            Self::Success | Self::Info => "status",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastMessage {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub body: String,
    pub duration_ms: u32,
    pub leaving: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub toasts: Vec<ToastMessage>,
    next_id: u64,
}

impl ToastState {
    /// Queue a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, title: impl Into<String>, body: impl Into<String>, duration_ms: u32) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(ToastMessage {
            id,
            kind,
            title: title.into(),
            body: body.into(),
            duration_ms,
            leaving: false,
        });
        if self.toasts.len() > MAX_VISIBLE {
            let overflow = self.toasts.len() - MAX_VISIBLE;
            self.toasts.drain(..overflow);
        }
        id
    }

    /// Mark a toast as leaving. Returns `false` if it is gone or already leaving.
    pub fn begin_exit(&mut self, id: u64) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) if !toast.leaving => {
                toast.leaving = true;
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn get(&self, id: u64) -> Option<&ToastMessage> {
        self.toasts.iter().find(|t| t.id == id)
    }
}

/// Delays (from emit) at which a toast starts leaving and is removed.
///
/// `None` for a zero duration: such toasts never auto-dismiss.
pub fn auto_dismiss_schedule(duration_ms: u32) -> Option<(u32, u32)> {
    if duration_ms == 0 {
        None
    } else {
        Some((duration_ms, duration_ms.saturating_add(EXIT_ANIMATION_MS)))
    }
}
