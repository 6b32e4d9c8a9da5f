//! # portal
//!
//! Leptos + WASM frontend for the student admissions portal. Students
//! register, verify their email, follow their application status, and get a
//! one-time welcome notification on their first authenticated visit.
//!
//! Authentication is delegated to Firebase Auth (REST), profile data to the
//! admissions backend API. This crate holds pages, components, reactive
//! state, the auth/session plumbing, and the HTTP clients.

pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs browser logging and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
