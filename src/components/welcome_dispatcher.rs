//! Invisible component that sends the one-time welcome notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! Watches the session; `next_check` decides when a new signed-in identity
//! moves to `Checking`, and `run_welcome_dispatch` then runs in a local task.
//! `settle_report` drops the result when the component unmounted or the
//! identity changed meanwhile; the requests and the record write still
//! complete.
//!
//! TRADE-OFFS
//! ==========
//! Two dispatchers mounted for the same identity can both read "no record"
//! before either writes it. Only one is mounted per page, so at-most-once is
//! best effort rather than guaranteed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

use crate::auth::firebase::FirebaseAuth;
use crate::config::AppConfig;
use crate::state::session::Session;
use crate::state::welcome::{WelcomeMachine, WelcomeStatus};
use crate::util::welcome_dispatch::next_check;

/// Renders nothing. Pass `status` to observe the dispatch outcome.
#[component]
pub fn WelcomeDispatcher(#[prop(optional)] status: Option<RwSignal<WelcomeStatus>>) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let auth = expect_context::<FirebaseAuth>();
    let config = expect_context::<AppConfig>();
    let status = status.unwrap_or_else(|| RwSignal::new(WelcomeStatus::default()));
    let machine = StoredValue::new(WelcomeMachine::default());

    let alive = Arc::new(AtomicBool::new(true));
    let alive_cleanup = Arc::clone(&alive);
    on_cleanup(move || alive_cleanup.store(false, Ordering::Relaxed));

    Effect::new(move || {
        let snapshot = session.get();
        let Some((checking, user)) = machine.try_update_value(|m| next_check(m, &snapshot)).flatten() else {
            return;
        };

        status.set(WelcomeStatus { is_loading: true, ..WelcomeStatus::default() });
        spawn_dispatch(checking, user, auth.clone(), &config, machine, status, Arc::clone(&alive));
    });
}

#[cfg(feature = "hydrate")]
fn spawn_dispatch(
    checking: WelcomeMachine,
    user: crate::state::session::SessionUser,
    auth: FirebaseAuth,
    config: &AppConfig,
    machine: StoredValue<WelcomeMachine>,
    status: RwSignal<WelcomeStatus>,
    alive: Arc<AtomicBool>,
) {
    use crate::net::welcome::HttpWelcomeClient;
    use crate::util::clock::now_rfc3339;
    use crate::util::storage::BrowserStorage;
    use crate::util::welcome_dispatch::{WelcomeRecipient, run_welcome_dispatch, settle_report};

    let transport = HttpWelcomeClient::new(config.welcome_api_base_url.clone(), auth);
    leptos::task::spawn_local(async move {
        let recipient = WelcomeRecipient::from(&user);
        let report = run_welcome_dispatch(checking, &BrowserStorage, &transport, &recipient, now_rfc3339).await;
        let alive = alive.load(Ordering::Relaxed);
        if let Some(settled) = machine.try_update_value(|m| settle_report(alive, m, report)).flatten() {
            status.set(settled);
        }
    });
}

#[cfg(not(feature = "hydrate"))]
fn spawn_dispatch(
    checking: WelcomeMachine,
    user: crate::state::session::SessionUser,
    auth: FirebaseAuth,
    config: &AppConfig,
    machine: StoredValue<WelcomeMachine>,
    status: RwSignal<WelcomeStatus>,
    alive: Arc<AtomicBool>,
) {
    let _ = (checking, user, auth, config, machine, status, alive);
}
