//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read/write shared state from Leptos context providers
//! (`RwSignal<Session>`, `RwSignal<ToastState>`, `FirebaseAuth`, `AppConfig`).

pub mod loading_skeleton;
pub mod protected_route;
pub mod session_provider;
pub mod site_header;
pub mod toast_host;
pub mod welcome_dispatcher;
