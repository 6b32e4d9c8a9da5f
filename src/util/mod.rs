//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and effectful flows
//! from page and component logic to improve reuse and testability.

pub mod auth;
pub mod clock;
pub mod storage;
pub mod welcome_dispatch;
