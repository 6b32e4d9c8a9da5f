//! Student dashboard: application status, profile editing, and the first
//! visit welcome.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only verified students reach this page, so it is also where the welcome
//! dispatcher is mounted. The profile is fetched once per mount; saving
//! replaces it with the backend's stored copy.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use super::register::{PROGRAMS, normalize_phone};
use crate::auth::firebase::FirebaseAuth;
use crate::components::loading_skeleton::LoadingSkeleton;
use crate::components::protected_route::ProtectedRoute;
use crate::components::toast_host::{push_toast, toast_error};
use crate::components::welcome_dispatcher::WelcomeDispatcher;
use crate::config::AppConfig;
use crate::net::types::{ApplicationStatus, ProfileUpdate, StudentProfile};
use crate::state::session::Session;
use crate::state::toast::{DEFAULT_DURATION_MS, ToastKind, ToastState};
use crate::state::welcome::WelcomeStatus;

/// Trim and check the editable profile fields.
fn validate_profile_update(update: &ProfileUpdate) -> Result<ProfileUpdate, &'static str> {
    let first_name = update.first_name.trim();
    let last_name = update.last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err("Enter your first and last name.");
    }
    let phone_number = normalize_phone(&update.phone_number).ok_or("Enter a phone number with country code.")?;
    if !PROGRAMS.contains(&update.program.as_str()) {
        return Err("Choose a program.");
    }
    Ok(ProfileUpdate {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        phone_number,
        program: update.program.clone(),
    })
}

/// Badge modifier for a status.
fn status_badge_class(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Accepted => "status-badge status-badge--success",
        ApplicationStatus::Rejected => "status-badge status-badge--error",
        ApplicationStatus::Waitlisted => "status-badge status-badge--warning",
        ApplicationStatus::Submitted | ApplicationStatus::UnderReview => "status-badge status-badge--info",
        ApplicationStatus::Draft | ApplicationStatus::Unknown => "status-badge",
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <DashboardContent/>
        </ProtectedRoute>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let auth = expect_context::<FirebaseAuth>();
    let config = expect_context::<AppConfig>();

    let welcome = RwSignal::new(WelcomeStatus::default());
    let profile = RwSignal::new(None::<StudentProfile>);
    let form = RwSignal::new(ProfileUpdate::default());
    let saving = RwSignal::new(false);

    let loaded = LocalResource::new({
        let (auth, config) = (auth.clone(), config.clone());
        move || {
            let (auth, config) = (auth.clone(), config.clone());
            async move { crate::net::api::fetch_profile(&config, &auth).await }
        }
    });

    Effect::new(move || match loaded.get() {
        Some(Ok(fetched)) => {
            form.set(fetched.to_update());
            profile.set(Some(fetched));
        }
        Some(Err(err)) => {
            log::warn!("profile fetch failed: {err}");
            toast_error(toasts, "Could not load your profile", &err);
        }
        None => {}
    });

    let greeting = move || session.with(|s| s.user.as_ref().map(|u| u.greeting_name()).unwrap_or_default());
    let status = move || profile.with(|p| p.as_ref().map(|p| p.application_status));

    let save = Callback::new(move |()| {
        if saving.get() {
            return;
        }
        let update = match form.with(validate_profile_update) {
            Ok(update) => update,
            Err(message) => {
                push_toast(toasts, ToastKind::Warning, message, "", DEFAULT_DURATION_MS);
                return;
            }
        };
        saving.set(true);

        #[cfg(feature = "hydrate")]
        {
            let (auth, config) = (auth.clone(), config.clone());
            leptos::task::spawn_local(async move {
                match crate::net::api::update_profile(&config, &auth, &update).await {
                    Ok(stored) => {
                        form.set(stored.to_update());
                        profile.set(Some(stored));
                        crate::components::toast_host::toast_success(toasts, "Profile saved", "");
                    }
                    Err(err) => {
                        toast_error(toasts, "Could not save your profile", &err);
                    }
                }
                saving.set(false);
            });
        }

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&auth, &config, update);
            saving.set(false);
        }
    });

    let text_field = move |label: &'static str,
                           kind: &'static str,
                           get: fn(&ProfileUpdate) -> String,
                           set: fn(&mut ProfileUpdate, String)| {
        view! {
            <label class="profile-form__label">
                {label}
                <input
                    class="profile-form__input"
                    type=kind
                    prop:value=move || form.with(get)
                    on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                />
            </label>
        }
    };

    view! {
        <WelcomeDispatcher status=welcome/>
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>{move || format!("Welcome, {}", greeting())}</h1>
            </header>

            <Show when=move || welcome.with(|w| w.success)>
                <p class="dashboard-page__notice">
                    "We've sent you a welcome email and message with your next steps."
                </p>
            </Show>

            <section class="dashboard-card">
                <h2>"Application status"</h2>
                {move || match status() {
                    Some(status) => view! {
                        <div class="dashboard-card__status">
                            <span class=status_badge_class(status)>{status.label()}</span>
                            <p>{status.description()}</p>
                        </div>
                    }
                        .into_any(),
                    None => view! { <LoadingSkeleton lines=1/> }.into_any(),
                }}
            </section>

            <section class="dashboard-card">
                <h2>"Your profile"</h2>
                <Show when=move || profile.with(Option::is_some) fallback=|| view! { <LoadingSkeleton/> }>
                    <form
                        class="profile-form"
                        on:submit=move |ev: leptos::ev::SubmitEvent| {
                            ev.prevent_default();
                            save.run(());
                        }
                    >
                        <div class="profile-form__row">
                            {text_field("First name", "text", |f| f.first_name.clone(), |f, v| f.first_name = v)}
                            {text_field("Last name", "text", |f| f.last_name.clone(), |f, v| f.last_name = v)}
                        </div>
                        {text_field("Phone", "tel", |f| f.phone_number.clone(), |f, v| f.phone_number = v)}
                        <label class="profile-form__label">
                            "Program"
                            <select
                                class="profile-form__input"
                                prop:value=move || form.with(|f| f.program.clone())
                                on:change=move |ev| form.update(|f| f.program = event_target_value(&ev))
                            >
                                {PROGRAMS.iter().map(|p| view! { <option value=*p>{*p}</option> }).collect_view()}
                            </select>
                        </label>
                        <button class="btn btn--primary" type="submit" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save changes" }}
                        </button>
                    </form>
                </Show>
            </section>
        </div>
    }
}
