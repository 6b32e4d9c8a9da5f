//! Networking modules for the admissions backend and the welcome API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns request setup, timeouts, and response decoding; `api` talks to
//! the registration/profile backend; `welcome` talks to the notification API;
//! `types` defines the shared wire schema.

pub mod api;
pub mod http;
pub mod types;
pub mod welcome;
