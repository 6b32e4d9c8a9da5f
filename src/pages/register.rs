//! New-applicant registration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend creates the auth account and the profile in one call. The page
//! then signs the student in and asks the provider to send the verification
//! email, so the next screen is `/verify-email`. A failure after the account
//! exists still leaves a usable account; the student can sign in normally.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::login::looks_like_email;
use crate::auth::firebase::FirebaseAuth;
use crate::components::toast_host::push_toast;
use crate::config::AppConfig;
use crate::net::types::RegisterRequest;
use crate::state::toast::{DEFAULT_DURATION_MS, ToastKind, ToastState};
use crate::util::auth::VERIFY_EMAIL_ROUTE;

pub const MIN_PASSWORD_CHARS: usize = 6;

/// Programs offered on the application form.
pub const PROGRAMS: &[&str] = &[
    "Computer Science",
    "Business Administration",
    "Mechanical Engineering",
    "Nursing",
    "Psychology",
    "Undeclared",
];

/// Step of the registration flow that failed.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RegistrationStage {
    Create,
    SignIn,
    Verify,
}

#[cfg(any(test, feature = "hydrate"))]
impl RegistrationStage {
    /// Toast title and follow-up route for a failure at this stage. Once the
    /// account exists the student is never told registration failed.
    fn failure(self) -> (&'static str, Option<&'static str>) {
        match self {
            Self::Create => ("Registration failed", None),
            Self::SignIn => ("Account created, please sign in", Some(crate::util::auth::LOGIN_ROUTE)),
            Self::Verify => ("Account created, verification email not sent", Some(VERIFY_EMAIL_ROUTE)),
        }
    }
}

/// Raw form values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct RegisterForm {
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
    program: String,
    password: String,
    confirm_password: String,
}

/// Validate and normalize the form into a backend request.
fn validate_registration(form: &RegisterForm) -> Result<RegisterRequest, &'static str> {
    let first_name = form.first_name.trim();
    let last_name = form.last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err("Enter your first and last name.");
    }
    let email = form.email.trim();
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    let phone_number = normalize_phone(&form.phone_number).ok_or("Enter a phone number with country code.")?;
    if !PROGRAMS.contains(&form.program.as_str()) {
        return Err("Choose a program.");
    }
    if form.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err("Password must be at least 6 characters.");
    }
    if form.password != form.confirm_password {
        return Err("Passwords do not match.");
    }
    Ok(RegisterRequest {
        email: email.to_owned(),
        password: form.password.clone(),
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        phone_number,
        program: form.program.clone(),
    })
}

/// Strip separators and require `+` followed by 8-15 digits (E.164).
pub(crate) fn normalize_phone(raw: &str) -> Option<String> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();
    let digits = compact.strip_prefix('+')?;
    let valid = (8..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());
    valid.then_some(compact)
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let auth = expect_context::<FirebaseAuth>();
    let config = expect_context::<AppConfig>();
    let navigate = use_navigate();

    let form = RwSignal::new(RegisterForm::default());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match form.with(validate_registration) {
            Ok(request) => request,
            Err(message) => {
                push_toast(toasts, ToastKind::Warning, message, "", DEFAULT_DURATION_MS);
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let (auth, config, navigate) = (auth.clone(), config.clone(), navigate.clone());
            leptos::task::spawn_local(async move {
                match complete_registration(&config, &auth, &request).await {
                    Ok(()) => {
                        crate::components::toast_host::toast_success(
                            toasts,
                            "Account created",
                            "Check your inbox for the verification link.",
                        );
                        navigate(VERIFY_EMAIL_ROUTE, NavigateOptions::default());
                    }
                    Err((stage, err)) => {
                        let (title, next) = stage.failure();
                        crate::components::toast_host::toast_error(toasts, title, &err);
                        if let Some(route) = next {
                            navigate(route, NavigateOptions::default());
                        }
                    }
                }
                busy.set(false);
            });
        }

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&auth, &config, &navigate, request);
            busy.set(false);
        }
    };

    let field = move |label: &'static str,
                      kind: &'static str,
                      autocomplete: &'static str,
                      get: fn(&RegisterForm) -> String,
                      set: fn(&mut RegisterForm, String)| {
        view! {
            <label class="auth-form__label">
                {label}
                <input
                    class="auth-input"
                    type=kind
                    autocomplete=autocomplete
                    prop:value=move || form.with(get)
                    on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                />
            </label>
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--wide">
                <h1>"Apply"</h1>
                <p class="auth-card__subtitle">"Create your applicant account"</p>
                <form class="auth-form" on:submit=on_submit>
                    <div class="auth-form__row">
                        {field("First name", "text", "given-name", |f| f.first_name.clone(), |f, v| f.first_name = v)}
                        {field("Last name", "text", "family-name", |f| f.last_name.clone(), |f, v| f.last_name = v)}
                    </div>
                    {field("Email", "email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                    {field(
                        "Phone (with country code)",
                        "tel",
                        "tel",
                        |f| f.phone_number.clone(),
                        |f, v| f.phone_number = v,
                    )}
                    <label class="auth-form__label">
                        "Program"
                        <select
                            class="auth-input"
                            prop:value=move || form.with(|f| f.program.clone())
                            on:change=move |ev| form.update(|f| f.program = event_target_value(&ev))
                        >
                            <option value="">"Select a program"</option>
                            {PROGRAMS.iter().map(|p| view! { <option value=*p>{*p}</option> }).collect_view()}
                        </select>
                    </label>
                    {field("Password", "password", "new-password", |f| f.password.clone(), |f, v| f.password = v)}
                    {field(
                        "Confirm password",
                        "password",
                        "new-password",
                        |f| f.confirm_password.clone(),
                        |f, v| f.confirm_password = v,
                    )}
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create account" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Already applied? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}

/// Register, sign in, and request the verification email.
#[cfg(feature = "hydrate")]
async fn complete_registration(
    config: &AppConfig,
    auth: &FirebaseAuth,
    request: &RegisterRequest,
) -> Result<(), (RegistrationStage, crate::error::AppError)> {
    let created = crate::net::api::register(config, request)
        .await
        .map_err(|err| (RegistrationStage::Create, err))?;
    log::info!("registered applicant {}", created.uid);
    auth.sign_in(&request.email, &request.password)
        .await
        .map_err(|err| (RegistrationStage::SignIn, err))?;
    auth.send_verification_email()
        .await
        .map_err(|err| (RegistrationStage::Verify, err))
}
