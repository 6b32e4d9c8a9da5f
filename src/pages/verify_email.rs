//! Holding page for signed-in students whose email is not yet verified.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::auth::firebase::FirebaseAuth;
use crate::components::protected_route::ProtectedRoute;
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::auth::DASHBOARD_ROUTE;

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    view! {
        <ProtectedRoute require_email_verification=false>
            <VerifyEmailPanel/>
        </ProtectedRoute>
    }
}

#[component]
fn VerifyEmailPanel() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let auth = expect_context::<FirebaseAuth>();
    let navigate = use_navigate();
    let busy = RwSignal::new(false);

    Effect::new(move || {
        if session.with(Session::email_verified) {
            navigate(DASHBOARD_ROUTE, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let email = move || session.with(|s| s.user.as_ref().map(|u| u.email.clone()).unwrap_or_default());

    let on_resend = {
        let auth = auth.clone();
        move |_| {
            if busy.get() {
                return;
            }
            busy.set(true);
            #[cfg(feature = "hydrate")]
            {
                use crate::components::toast_host::{push_toast, toast_error};
                use crate::state::toast::{DEFAULT_DURATION_MS, ToastKind};

                let auth = auth.clone();
                leptos::task::spawn_local(async move {
                    match auth.send_verification_email().await {
                        Ok(()) => push_toast(
                            toasts,
                            ToastKind::Success,
                            "Verification email sent",
                            "It can take a minute to arrive. Check your spam folder too.",
                            DEFAULT_DURATION_MS,
                        ),
                        Err(err) => toast_error(toasts, "Could not send email", &err),
                    };
                    busy.set(false);
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (&auth, toasts);
                busy.set(false);
            }
        }
    };

    let on_check = {
        let auth = auth.clone();
        move |_| {
            if busy.get() {
                return;
            }
            busy.set(true);
            #[cfg(feature = "hydrate")]
            {
                use crate::components::toast_host::{push_toast, toast_error};
                use crate::state::toast::{DEFAULT_DURATION_MS, ToastKind};

                let auth = auth.clone();
                leptos::task::spawn_local(async move {
                    match auth.reload().await {
                        Ok(user) if !user.email_verified => push_toast(
                            toasts,
                            ToastKind::Info,
                            "Not verified yet",
                            "Open the link in the email we sent, then try again.",
                            DEFAULT_DURATION_MS,
                        ),
                        Ok(_) => 0,
                        Err(err) => toast_error(toasts, "Could not refresh", &err),
                    };
                    busy.set(false);
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (&auth, toasts);
                busy.set(false);
            }
        }
    };

    let on_sign_out = move |_| auth.sign_out();

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Verify your email"</h1>
                <p class="auth-card__subtitle">
                    "We sent a verification link to "
                    <strong>{email}</strong>
                    ". Open it to continue to your dashboard."
                </p>
                <div class="auth-card__actions">
                    <button class="btn btn--primary" type="button" disabled=move || busy.get() on:click=on_check>
                        "I've verified my email"
                    </button>
                    <button class="btn" type="button" disabled=move || busy.get() on:click=on_resend>
                        "Resend email"
                    </button>
                    <button class="btn btn--ghost" type="button" on:click=on_sign_out>
                        "Use a different account"
                    </button>
                </div>
            </div>
        </div>
    }
}
