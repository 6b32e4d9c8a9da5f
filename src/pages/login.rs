//! Email + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::auth::firebase::FirebaseAuth;
use crate::components::toast_host::push_toast;
use crate::state::session::Session;
use crate::state::toast::{DEFAULT_DURATION_MS, ToastKind, ToastState};
use crate::util::auth::DASHBOARD_ROUTE;

/// Trim the email and require both fields.
fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Cheap shape check; the auth provider has the final word.
pub(crate) fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let auth = expect_context::<FirebaseAuth>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Signed-in visitors go straight to the dashboard; its guard handles
    // unverified accounts.
    Effect::new(move || {
        let signed_in = session.with(|s| !s.loading && s.user.is_some());
        if signed_in {
            navigate(DASHBOARD_ROUTE, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                push_toast(toasts, ToastKind::Warning, message, "", DEFAULT_DURATION_MS);
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let auth = auth.clone();
            leptos::task::spawn_local(async move {
                if let Err(err) = auth.sign_in(&email_value, &password_value).await {
                    crate::components::toast_host::toast_error(toasts, "Sign-in failed", &err);
                    password.set(String::new());
                }
                busy.set(false);
            });
        }

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&auth, email_value, password_value);
            busy.set(false);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Student Portal"</h1>
                <p class="auth-card__subtitle">"Sign in to follow your application"</p>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-form__label">
                        "Email"
                        <input
                            class="auth-input"
                            type="email"
                            autocomplete="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-form__label">
                        "Password"
                        <input
                            class="auth-input"
                            type="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "New applicant? "
                    <a href="/register">"Create an account"</a>
                </p>
            </div>
        </div>
    }
}
