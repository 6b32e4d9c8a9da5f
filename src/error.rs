//! Client error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Account flows (login, registration, profile updates) return these errors to
//! the page, which renders them in a toast. Welcome notifications catch them
//! at the dispatcher boundary and only log. Messages must be safe to render
//! and never include passwords or token material.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use thiserror::Error;

/// Maximum number of error body characters surfaced to the UI.
pub const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    /// The backend answered with `success: false`.
    #[error("{0}")]
    Api(String),
    /// The auth provider rejected the request; the message is student-facing.
    #[error("{0}")]
    Auth(String),
    #[error("You are not signed in.")]
    SessionUnavailable,
    #[error("Could not obtain an access token: {0}")]
    TokenUnavailable(String),
}

impl AppError {
    /// Builds an `Http` error from a raw response body.
    pub fn http(status: u16, body: &str) -> Self {
        Self::Http { status, message: sanitize_body(body) }
    }
}

/// Trims and truncates HTTP error bodies before they reach the UI.
pub fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_owned()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
