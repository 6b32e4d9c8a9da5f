//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written only by the session provider from auth hub events; read by route
//! guards, the welcome dispatcher, and user-aware pages.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

/// Signed-in user as reported by the auth provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Opaque provider identity (Firebase `localId`).
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub phone_number: Option<String>,
    pub email_verified: bool,
}

impl SessionUser {
    /// Name used in greetings: display name, else the email local part.
    pub fn greeting_name(&self) -> String {
        if let Some(name) = self.display_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_owned();
        }
        match self.email.split('@').next().map(str::trim) {
            Some(local) if !local.is_empty() => local.to_owned(),
            _ => "Student".to_owned(),
        }
    }
}

/// Current session snapshot. Starts in `loading` until the provider reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl Session {
    /// Snapshot after the provider has resolved the user (or its absence).
    pub fn resolved(user: Option<SessionUser>) -> Self {
        Self { user, loading: false }
    }

    pub fn uid(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.uid.as_str())
    }

    pub fn email_verified(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.email_verified)
    }
}
