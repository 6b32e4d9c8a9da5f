//! Route-guard decisions shared by protected pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route applies identical redirect behavior: wait while the
//! session loads, send anonymous visitors to `/login`, send unverified
//! students to `/verify-email`. The decision is a pure function of the
//! session snapshot so it can be tested without a browser.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::Session;

pub const LOGIN_ROUTE: &str = "/login";
pub const VERIFY_EMAIL_ROUTE: &str = "/verify-email";
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Route-guard outcome for one session snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Loading,
    Unauthenticated,
    Unverified,
    Authorized,
}

/// Classify a session for a protected route.
pub fn evaluate_guard(session: &Session, require_email_verification: bool) -> GuardState {
    if session.loading {
        return GuardState::Loading;
    }
    match &session.user {
        None => GuardState::Unauthenticated,
        Some(user) if require_email_verification && !user.email_verified => GuardState::Unverified,
        Some(_) => GuardState::Authorized,
    }
}

/// Memoized guard state over the session and an optional verification flag.
///
/// A missing flag means verification is required. Equal snapshots do not
/// notify subscribers.
pub fn guard_memo(session: RwSignal<Session>, require_email_verification: Option<Signal<bool>>) -> Memo<GuardState> {
    Memo::new(move |_| {
        let require = require_email_verification.map_or(true, |flag| flag.get());
        session.with(|s| evaluate_guard(s, require))
    })
}

/// Where a guard state sends the visitor, if anywhere.
pub fn redirect_target(state: GuardState) -> Option<&'static str> {
    match state {
        GuardState::Unauthenticated => Some(LOGIN_ROUTE),
        GuardState::Unverified => Some(VERIFY_EMAIL_ROUTE),
        GuardState::Loading | GuardState::Authorized => None,
    }
}

/// Navigate whenever the guard state calls for a redirect.
///
/// `guard` should be a memo so the effect only re-runs on real transitions.
pub fn install_guard_redirect<F>(guard: Memo<GuardState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(target) = redirect_target(guard.get()) {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
