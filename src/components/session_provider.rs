//! Bridges the auth hub into a reactive `Session` context.

use leptos::prelude::*;

use crate::auth::firebase::FirebaseAuth;
use crate::state::session::Session;

/// Provides `RwSignal<Session>` to descendants.
///
/// The signal starts in `loading` and is replaced on every hub event. The
/// hub subscription is dropped when the provider is cleaned up.
#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let auth = expect_context::<FirebaseAuth>();
    let session = RwSignal::new(Session::default());
    provide_context(session);

    let subscription = auth.hub().subscribe(move |user| {
        let _ = session.try_set(Session::resolved(user.cloned()));
    });
    on_cleanup(move || drop(subscription));

    view! { {children()} }
}
