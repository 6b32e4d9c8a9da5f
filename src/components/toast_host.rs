//! Toast stack and the helpers that emit toasts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call `push_toast`/`toast_error` with the shared `RwSignal<ToastState>`.
//! Auto-dismiss timers run on the browser event loop; server renders never
//! schedule them. Timers only touch the signal through `try_update`, so a
//! toast outliving the app is harmless.

use leptos::prelude::*;

use crate::error::AppError;
use crate::state::toast::{
    DEFAULT_DURATION_MS, EXIT_ANIMATION_MS, ToastKind, ToastMessage, ToastState, auto_dismiss_schedule,
};

/// Queue a toast and schedule its automatic dismissal.
pub fn push_toast(
    toasts: RwSignal<ToastState>,
    kind: ToastKind,
    title: impl Into<String>,
    body: impl Into<String>,
    duration_ms: u32,
) -> u64 {
    let (title, body) = (title.into(), body.into());
    let Some(id) = toasts.try_update(|s| s.push(kind, title, body, duration_ms)) else {
        return 0;
    };
    if let Some((exit_at, remove_at)) = auto_dismiss_schedule(duration_ms) {
        schedule_exit(toasts, id, exit_at, remove_at);
    }
    id
}

/// Error toast for a failed account action.
pub fn toast_error(toasts: RwSignal<ToastState>, title: &str, err: &AppError) -> u64 {
    push_toast(toasts, ToastKind::Error, title, err.to_string(), DEFAULT_DURATION_MS)
}

pub fn toast_success(toasts: RwSignal<ToastState>, title: &str, body: &str) -> u64 {
    push_toast(toasts, ToastKind::Success, title, body, DEFAULT_DURATION_MS)
}

/// Start the exit transition now and remove the toast when it ends.
pub fn dismiss_toast(toasts: RwSignal<ToastState>, id: u64) {
    if toasts.try_update(|s| s.begin_exit(id)) == Some(true) {
        schedule_exit(toasts, id, 0, EXIT_ANIMATION_MS);
    }
}

fn schedule_exit(toasts: RwSignal<ToastState>, id: u64, exit_at: u32, remove_at: u32) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        use std::time::Duration;
        gloo_timers::future::sleep(Duration::from_millis(u64::from(exit_at))).await;
        let _ = toasts.try_update(|s| s.begin_exit(id));
        gloo_timers::future::sleep(Duration::from_millis(u64::from(remove_at.saturating_sub(exit_at)))).await;
        let _ = toasts.try_update(|s| s.remove(id));
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (toasts, id, exit_at, remove_at);
    }
}

/// Fixed-position stack rendering the current toasts.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.get().toasts
                key=|toast| (toast.id, toast.leaving)
                children=move |toast: ToastMessage| view! { <ToastCard toast=toast toasts=toasts/> }
            />
        </div>
    }
}

#[component]
fn ToastCard(toast: ToastMessage, toasts: RwSignal<ToastState>) -> impl IntoView {
    let ToastMessage { id, kind, title, body, leaving, .. } = toast;
    let class = format!("toast {}{}", kind.css_modifier(), if leaving { " toast--leaving" } else { "" });
    let has_body = !body.is_empty();

    view! {
        <div class=class role=kind.aria_role()>
            <div class="toast__content">
                <p class="toast__title">{title}</p>
                <Show when=move || has_body>
                    <p class="toast__body">{body.clone()}</p>
                </Show>
            </div>
            <button
                class="toast__close"
                type="button"
                aria-label="Dismiss notification"
                on:click=move |_| dismiss_toast(toasts, id)
            >
                "×"
            </button>
        </div>
    }
}
