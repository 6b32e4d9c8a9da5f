//! Firebase Auth over its REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sign-in exchanges email + password for an ID token and a refresh token.
//! Only the refresh token (plus uid) is persisted, in `localStorage`, so a
//! reload can restore the session; ID tokens are minted per use and never
//! stored. Every user change is published to the `SessionHub`.
//!
//! ERROR HANDLING
//! ==============
//! Provider error codes become student-facing `AppError::Auth` messages. A
//! failed restore is not an error: it signs the visitor out quietly.
//! Passwords and tokens are never logged.

#[cfg(test)]
#[path = "firebase_test.rs"]
mod firebase_test;

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use url::Url;

use super::TokenSource;
use super::hub::SessionHub;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::net::http::{self, HttpMethod, RequestBody};
use crate::state::session::SessionUser;
use crate::util::storage::{BrowserStorage, KeyValueStore, load_json, save_json};

/// `localStorage` key holding the persisted refresh credentials.
pub const SESSION_STORAGE_KEY: &str = "portal_auth_session";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct StoredCredentials {
    uid: String,
    refresh_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordSignIn<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    id_token: String,
    refresh_token: String,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    user_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdTokenBody<'a> {
    id_token: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeRequest<'a> {
    request_type: &'static str,
    id_token: &'a str,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    email_verified: bool,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
}

impl From<LookupUser> for SessionUser {
    fn from(user: LookupUser) -> Self {
        Self {
            uid: user.local_id,
            email: user.email,
            display_name: user.display_name.filter(|n| !n.trim().is_empty()),
            phone_number: user.phone_number.filter(|p| !p.trim().is_empty()),
            email_verified: user.email_verified,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Firebase Auth client bound to one session hub.
#[derive(Clone)]
pub struct FirebaseAuth {
    config: Arc<AppConfig>,
    hub: SessionHub,
    credentials: Arc<Mutex<Option<StoredCredentials>>>,
}

impl FirebaseAuth {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            hub: SessionHub::new(),
            credentials: Arc::new(Mutex::new(None)),
        }
    }

    pub fn hub(&self) -> &SessionHub {
        &self.hub
    }

    /// Restore a persisted session, publishing the result either way.
    pub async fn restore(&self) {
        let Some(stored) = load_json::<StoredCredentials>(&BrowserStorage, SESSION_STORAGE_KEY) else {
            self.hub.publish(None);
            return;
        };
        self.set_credentials(Some(stored));
        match self.reload().await {
            Ok(user) => log::info!("restored session for {}", user.uid),
            Err(err) if restore_failure_clears_session(&err) => {
                log::info!("stored session rejected, signing out: {err}");
                self.sign_out();
            }
            Err(err) => {
                // Keep the stored refresh token for the next page load.
                log::warn!("session restore unavailable: {err}");
                *self.credentials.lock().unwrap_or_else(PoisonError::into_inner) = None;
                self.hub.publish(None);
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `Auth` with a student-facing message when the provider rejects
    /// the credentials, or a transport error.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, AppError> {
        let url = self.identity_endpoint("accounts:signInWithPassword")?;
        let body = http::encode_json(&PasswordSignIn { email: email.trim(), password, return_secure_token: true })?;
        let response = http::send(HttpMethod::Post, &url, body, None).await?;
        let signed_in: SignInResponse = decode_provider(&response)?;

        self.set_credentials(Some(StoredCredentials {
            uid: signed_in.local_id,
            refresh_token: signed_in.refresh_token,
        }));
        let user = self.lookup(&signed_in.id_token).await?;
        self.hub.publish(Some(user.clone()));
        Ok(user)
    }

    /// Re-read the user from the provider, e.g. after the student clicked
    /// the verification link in another tab.
    ///
    /// # Errors
    ///
    /// Returns `SessionUnavailable` when signed out, otherwise provider errors.
    pub async fn reload(&self) -> Result<SessionUser, AppError> {
        let id_token = self.fresh_id_token().await?;
        let user = self.lookup(&id_token).await?;
        self.hub.publish(Some(user.clone()));
        Ok(user)
    }

    /// Ask the provider to email a verification link to the current user.
    ///
    /// # Errors
    ///
    /// Returns `SessionUnavailable` when signed out, otherwise provider errors.
    pub async fn send_verification_email(&self) -> Result<(), AppError> {
        let id_token = self.fresh_id_token().await?;
        let url = self.identity_endpoint("accounts:sendOobCode")?;
        let body = http::encode_json(&OobCodeRequest { request_type: "VERIFY_EMAIL", id_token: &id_token })?;
        let response = http::send(HttpMethod::Post, &url, body, None).await?;
        decode_provider::<serde_json::Value>(&response).map(|_| ())
    }

    /// Forget the session locally and publish the signed-out state.
    pub fn sign_out(&self) {
        self.set_credentials(None);
        self.hub.publish(None);
    }

    /// Mint a new ID token from the stored refresh token.
    ///
    /// # Errors
    ///
    /// Returns `SessionUnavailable` when signed out, otherwise provider errors.
    pub async fn fresh_id_token(&self) -> Result<String, AppError> {
        let refresh_token = self
            .credentials()
            .map(|c| c.refresh_token)
            .ok_or(AppError::SessionUnavailable)?;
        let url = endpoint(&self.config.secure_token_url, "token", &self.config.firebase_api_key)?;
        let response = http::send(HttpMethod::Post, &url, RequestBody::Form(refresh_form(&refresh_token)), None).await?;
        let refreshed: RefreshResponse = decode_provider(&response)?;

        // The provider may rotate the refresh token.
        self.set_credentials(Some(StoredCredentials {
            uid: refreshed.user_id,
            refresh_token: refreshed.refresh_token,
        }));
        Ok(refreshed.id_token)
    }

    async fn lookup(&self, id_token: &str) -> Result<SessionUser, AppError> {
        let url = self.identity_endpoint("accounts:lookup")?;
        let body = http::encode_json(&IdTokenBody { id_token })?;
        let response = http::send(HttpMethod::Post, &url, body, None).await?;
        let lookup: LookupResponse = decode_provider(&response)?;
        lookup
            .users
            .into_iter()
            .next()
            .map(SessionUser::from)
            .ok_or(AppError::SessionUnavailable)
    }

    fn identity_endpoint(&self, method: &str) -> Result<String, AppError> {
        endpoint(&self.config.identity_toolkit_url, method, &self.config.firebase_api_key)
    }

    fn credentials(&self) -> Option<StoredCredentials> {
        self.credentials.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_credentials(&self, credentials: Option<StoredCredentials>) {
        match &credentials {
            Some(stored) => save_json(&BrowserStorage, SESSION_STORAGE_KEY, stored),
            None => BrowserStorage.remove(SESSION_STORAGE_KEY),
        }
        *self.credentials.lock().unwrap_or_else(PoisonError::into_inner) = credentials;
    }
}

impl TokenSource for FirebaseAuth {
    async fn bearer_token(&self) -> Result<String, AppError> {
        self.fresh_id_token()
            .await
            .map_err(|err| AppError::TokenUnavailable(err.to_string()))
    }
}

/// Whether a failed restore means the stored credential is dead. Transport
/// failures leave it in place.
fn restore_failure_clears_session(err: &AppError) -> bool {
    match err {
        AppError::Auth(_) | AppError::SessionUnavailable => true,
        AppError::Http { status, .. } => matches!(status, 400 | 401 | 403),
        _ => false,
    }
}

/// Build `{base}/{path}?key={api_key}`.
fn endpoint(base_url: &str, path: &str, api_key: &str) -> Result<String, AppError> {
    if api_key.trim().is_empty() {
        return Err(AppError::Config("Firebase API key is not configured.".to_owned()));
    }
    let mut url = Url::parse(&http::join_url(base_url, path))
        .map_err(|err| AppError::Config(format!("Invalid auth endpoint: {err}")))?;
    url.query_pairs_mut().append_pair("key", api_key.trim());
    Ok(url.into())
}

fn refresh_form(refresh_token: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", "refresh_token")
        .append_pair("refresh_token", refresh_token)
        .finish()
}

/// Decode a provider response, mapping its error object to `AppError::Auth`.
fn decode_provider<T: serde::de::DeserializeOwned>(response: &http::RawResponse) -> Result<T, AppError> {
    if response.ok() {
        return http::decode_json(response);
    }
    match serde_json::from_str::<ErrorBody>(&response.body) {
        Ok(body) => Err(AppError::Auth(provider_error_message(&body.error.message))),
        Err(_) => Err(AppError::http(response.status, &response.body)),
    }
}

/// Student-facing text for a provider error code such as
/// `WEAK_PASSWORD : Password should be at least 6 characters`.
fn provider_error_message(raw: &str) -> String {
    let code = raw.split([' ', ':']).next().unwrap_or_default();
    let message = match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => "Incorrect email or password.",
        "USER_DISABLED" => "This account has been disabled. Contact admissions support.",
        "EMAIL_EXISTS" => "An account with this email already exists.",
        "WEAK_PASSWORD" => "Password must be at least 6 characters.",
        "INVALID_EMAIL" => "Enter a valid email address.",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Please wait a moment and try again.",
        "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" | "INVALID_ID_TOKEN" => {
            "Your session has expired. Please sign in again."
        }
        _ => return format!("Authentication failed ({code})."),
    };
    message.to_owned()
}
