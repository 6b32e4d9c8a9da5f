//! HTTP plumbing shared by every client in the crate.
//!
//! Client-side (hydrate): real requests via `gloo-net`, aborted after
//! `DEFAULT_TIMEOUT_MS`. Server-side (SSR) and native tests: `send` fails
//! with a network error since these endpoints only make sense in a browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures become `Network`/`Timeout`; responses are returned raw
//! so each caller decodes its own error shape (backend envelope vs. Firebase
//! error object). Decoding helpers here are pure and unit tested.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::ApiEnvelope;
use crate::error::AppError;

/// Request timeout applied to every call.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    Json(String),
    Form(String),
}

/// Status + body of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Join a base URL and a path without doubling or dropping slashes.
/// An empty base yields the path unchanged (same-origin request).
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();
    if base.is_empty() {
        path.to_owned()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Serialize a request body to JSON.
///
/// # Errors
///
/// Returns `Serialization` if the value cannot be encoded.
pub fn encode_json<B: Serialize>(body: &B) -> Result<RequestBody, AppError> {
    serde_json::to_string(body)
        .map(RequestBody::Json)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))
}

/// Decode a plain JSON response, surfacing non-2xx statuses as `Http`.
///
/// # Errors
///
/// Returns `Http` for error statuses and `Parse` for undecodable bodies.
pub fn decode_json<T: DeserializeOwned>(response: &RawResponse) -> Result<T, AppError> {
    if !response.ok() {
        return Err(AppError::http(response.status, &response.body));
    }
    serde_json::from_str(&response.body).map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
}

/// Decode a `{success, data, error}` envelope.
///
/// A `success: false` envelope yields the backend's message whatever the
/// status. Only a 2xx response can succeed.
///
/// # Errors
///
/// Returns `Api` for `success: false`, `Http` for any other error status,
/// and `Parse` when a 2xx body is not a valid envelope.
pub fn decode_envelope<T: DeserializeOwned>(response: &RawResponse) -> Result<T, AppError> {
    match serde_json::from_str::<ApiEnvelope<T>>(&response.body) {
        Ok(envelope) if !envelope.success => envelope.into_result(),
        _ if !response.ok() => Err(AppError::http(response.status, &response.body)),
        Ok(envelope) => envelope.into_result(),
        Err(err) => Err(AppError::Parse(format!("Failed to decode response: {err}"))),
    }
}

/// Decode an envelope whose payload the caller does not need.
///
/// # Errors
///
/// Same as [`decode_envelope`].
pub fn decode_ack(response: &RawResponse) -> Result<(), AppError> {
    match serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&response.body) {
        Ok(envelope) if !envelope.success => envelope.into_result().map(|_| ()),
        _ if !response.ok() => Err(AppError::http(response.status, &response.body)),
        Ok(_) => Ok(()),
        Err(err) => Err(AppError::Parse(format!("Failed to decode response: {err}"))),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn body_read_error(message: &str) -> AppError {
    AppError::Network(format!("Failed to read response: {message}"))
}

#[cfg(any(test, feature = "hydrate"))]
fn classify_transport_error(message: &str) -> AppError {
    let lowered = message.to_lowercase();
    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_owned())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Send a request and return the raw response.
///
/// # Errors
///
/// Returns `Network`/`Timeout` when the request never completes and
/// `Network` when the response body cannot be read.
pub async fn send(method: HttpMethod, url: &str, body: RequestBody, bearer: Option<&str>) -> Result<RawResponse, AppError> {
    #[cfg(feature = "hydrate")]
    {
        use gloo_net::http::Request;
        use gloo_timers::callback::Timeout;

        let controller = web_sys::AbortController::new()
            .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_owned()))?;
        let signal = controller.signal();
        let timeout_controller = controller.clone();
        let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

        let mut builder = match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
        }
        .abort_signal(Some(&signal));
        if let Some(token) = bearer {
            builder = builder.header("Authorization", &bearer_header(token));
        }
        let request = match body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(payload) => builder.header("Content-Type", "application/json").body(payload),
            RequestBody::Form(payload) => builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(payload),
        }
        .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?;

        let response = request
            .send()
            .await
            .map_err(|err| classify_transport_error(&err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| body_read_error(&err.to_string()))?;
        Ok(RawResponse { status, body })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (method, url, body, bearer);
        Err(AppError::Network("not available on server".to_owned()))
    }
}
