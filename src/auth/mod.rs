//! Authentication: the session hub and the Firebase Auth client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `FirebaseAuth` performs sign-in, reload, verification mail, and token
//! refresh against the Firebase REST API and publishes every user change to
//! its `SessionHub`. The rest of the app only sees `Session` snapshots (via
//! `components::session_provider`) and the `TokenSource` seam.

pub mod firebase;
pub mod hub;

use std::future::Future;

use crate::error::AppError;

/// Source of bearer credentials for authenticated API calls.
pub trait TokenSource {
    /// Obtain a fresh ID token. Implementations must not hand out a cached
    /// token that may already be expired.
    fn bearer_token(&self) -> impl Future<Output = Result<String, AppError>>;
}
