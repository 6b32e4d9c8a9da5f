//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its form state and async orchestration; guarding, session
//! access, and toasts come from `components`. Input validation lives in plain
//! functions next to each page so it can be tested without a browser.

pub mod dashboard;
pub mod login;
pub mod register;
pub mod verify_email;
