//! Observable holder of the signed-in user.
//!
//! DESIGN
//! ======
//! One hub lives for the whole page. The auth client publishes every change
//! (sign-in, reload, sign-out, restore result); session providers subscribe
//! and keep only the last snapshot. A subscriber joining after the first
//! publish gets the latest snapshot immediately, so late mounts never sit in
//! `loading` forever.
//!
//! Listeners are invoked outside the lock, one after another, in subscription
//! order. Dropping the `Subscription` unsubscribes.

#[cfg(test)]
#[path = "hub_test.rs"]
mod hub_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::state::session::SessionUser;

type Listener = Arc<dyn Fn(Option<&SessionUser>) + Send + Sync>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    /// `None` until the first publish; then the latest user (or `None` user).
    latest: Option<Option<SessionUser>>,
}

#[derive(Clone, Default)]
pub struct SessionHub {
    inner: Arc<Mutex<HubInner>>,
}

fn lock(inner: &Mutex<HubInner>) -> MutexGuard<'_, HubInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Replays the latest snapshot if one was published.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Option<&SessionUser>) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        let (id, replay) = {
            let mut inner = lock(&self.inner);
            inner.next_id += 1;
            let id = inner.next_id;
            inner.listeners.push((id, Arc::clone(&listener)));
            (id, inner.latest.clone())
        };
        if let Some(user) = replay {
            listener(user.as_ref());
        }
        Subscription { hub: Arc::downgrade(&self.inner), id }
    }

    /// Record a new snapshot and notify every listener.
    pub fn publish(&self, user: Option<SessionUser>) {
        let listeners: Vec<Listener> = {
            let mut inner = lock(&self.inner);
            inner.latest = Some(user.clone());
            inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        for listener in listeners {
            listener(user.as_ref());
        }
    }

    /// Latest snapshot; outer `None` means nothing has been published yet.
    pub fn latest(&self) -> Option<Option<SessionUser>> {
        lock(&self.inner).latest.clone()
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.latest().flatten()
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }
}

/// Live registration on a `SessionHub`; unsubscribes on drop.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    hub: Weak<Mutex<HubInner>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            lock(&inner).listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
