//! Route guard wrapper for authenticated pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guard state is a memo over the session and the verification flag, so
//! children mount once per transition into `Authorized` and redirects fire
//! only on real changes. Nothing renders for the redirecting states; the new
//! session state arrives from the provider after navigation.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::loading_skeleton::LoadingSkeleton;
use crate::state::session::Session;
use crate::util::auth::{GuardState, guard_memo, install_guard_redirect};

/// Renders `children` only for an authorized session.
///
/// `require_email_verification` defaults to `true`.
#[component]
pub fn ProtectedRoute(
    children: ChildrenFn,
    #[prop(optional, into)] require_email_verification: Option<Signal<bool>>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let guard = guard_memo(session, require_email_verification);
    install_guard_redirect(guard, use_navigate());

    move || match guard.get() {
        GuardState::Loading => view! { <LoadingSkeleton/> }.into_any(),
        GuardState::Authorized => children().into_any(),
        GuardState::Unauthenticated | GuardState::Unverified => ().into_any(),
    }
}
