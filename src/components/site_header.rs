use leptos::prelude::*;

use crate::auth::firebase::FirebaseAuth;
use crate::state::session::Session;
use crate::util::auth::DASHBOARD_ROUTE;

/// Top bar with the portal brand and, when signed in, the student's name and
/// a sign-out button.
///
/// Signing out only publishes the empty session; guarded pages then redirect
/// to `/login` on their own.
#[component]
pub fn SiteHeader() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let auth = expect_context::<FirebaseAuth>();

    let greeting = move || session.with(|s| s.user.as_ref().map(|u| u.greeting_name()));

    view! {
        <header class="site-header">
            <a class="site-header__brand" href=DASHBOARD_ROUTE>
                "Admissions Portal"
            </a>
            <Show when=move || greeting().is_some()>
                <div class="site-header__account">
                    <span class="site-header__name">{move || greeting().unwrap_or_default()}</span>
                    <button
                        class="btn btn--ghost"
                        type="button"
                        on:click={
                            let auth = auth.clone();
                            move |_| auth.sign_out()
                        }
                    >
                        "Sign out"
                    </button>
                </div>
            </Show>
        </header>
    }
}
