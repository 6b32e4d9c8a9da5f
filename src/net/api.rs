//! Admissions backend calls: registration and the student profile.
//!
//! ERROR HANDLING
//! ==============
//! These are core account flows, so every failure is returned to the page
//! for display. Authenticated calls fail fast when no token can be minted.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{self, HttpMethod, RequestBody};
use super::types::{ProfileUpdate, RegisterRequest, RegisterResponse, StudentProfile};
use crate::auth::TokenSource;
use crate::config::AppConfig;
use crate::error::AppError;

pub const REGISTER_PATH: &str = "/auth/register";
pub const PROFILE_PATH: &str = "/users/profile";
pub const PROFILE_UPDATE_PATH: &str = "/users/update";

/// Create the student account and profile via `POST /auth/register`.
///
/// # Errors
///
/// Returns `Api` with the backend's message when registration is refused,
/// or a transport/HTTP error.
pub async fn register(config: &AppConfig, request: &RegisterRequest) -> Result<RegisterResponse, AppError> {
    let url = http::join_url(&config.api_base_url, REGISTER_PATH);
    let response = http::send(HttpMethod::Post, &url, http::encode_json(request)?, None).await?;
    http::decode_envelope(&response)
}

/// Fetch the signed-in student's profile and application status.
///
/// # Errors
///
/// Returns `TokenUnavailable` when no token can be minted, otherwise backend
/// or transport errors.
pub async fn fetch_profile(config: &AppConfig, tokens: &impl TokenSource) -> Result<StudentProfile, AppError> {
    let token = tokens.bearer_token().await?;
    let url = http::join_url(&config.api_base_url, PROFILE_PATH);
    let response = http::send(HttpMethod::Get, &url, RequestBody::Empty, Some(&token)).await?;
    http::decode_envelope(&response)
}

/// Save profile edits via `PUT /users/update`; returns the stored profile.
///
/// # Errors
///
/// Returns `TokenUnavailable` when no token can be minted, otherwise backend
/// or transport errors.
pub async fn update_profile(
    config: &AppConfig,
    tokens: &impl TokenSource,
    update: &ProfileUpdate,
) -> Result<StudentProfile, AppError> {
    let token = tokens.bearer_token().await?;
    let url = http::join_url(&config.api_base_url, PROFILE_UPDATE_PATH);
    let response = http::send(HttpMethod::Put, &url, http::encode_json(update)?, Some(&token)).await?;
    http::decode_envelope(&response)
}
