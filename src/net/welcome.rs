//! Welcome notification API client.
//!
//! Each call mints its own bearer token right before sending. When no token
//! can be obtained the call still goes out with an empty credential; the API
//! rejects it and the dispatcher logs the failure like any other.

#[cfg(test)]
#[path = "welcome_test.rs"]
mod welcome_test;

use std::future::Future;

use serde::Serialize;

use super::http::{self, HttpMethod};
use super::types::{WelcomeEmailRequest, WelcomeMessageRequest};
use crate::auth::TokenSource;
use crate::error::AppError;

pub const WELCOME_EMAIL_PATH: &str = "/api/welcome/email";
pub const WELCOME_MESSAGE_PATH: &str = "/api/welcome/whatsapp";

/// The two welcome channels.
pub trait WelcomeTransport {
    fn send_email(&self, request: &WelcomeEmailRequest) -> impl Future<Output = Result<(), AppError>>;
    fn send_message(&self, request: &WelcomeMessageRequest) -> impl Future<Output = Result<(), AppError>>;
}

pub struct HttpWelcomeClient<T> {
    base_url: String,
    tokens: T,
}

impl<T: TokenSource> HttpWelcomeClient<T> {
    pub fn new(base_url: impl Into<String>, tokens: T) -> Self {
        Self { base_url: base_url.into(), tokens }
    }

    /// Fresh token, or an empty credential when none can be minted.
    async fn credential(&self) -> String {
        match self.tokens.bearer_token().await {
            Ok(token) => token,
            Err(err) => {
                log::warn!("welcome: no bearer token, sending without credential: {err}");
                String::new()
            }
        }
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let token = self.credential().await;
        let url = http::join_url(&self.base_url, path);
        let response = http::send(HttpMethod::Post, &url, http::encode_json(body)?, Some(&token)).await?;
        http::decode_ack(&response)
    }
}

impl<T: TokenSource> WelcomeTransport for HttpWelcomeClient<T> {
    async fn send_email(&self, request: &WelcomeEmailRequest) -> Result<(), AppError> {
        self.post(WELCOME_EMAIL_PATH, request).await
    }

    async fn send_message(&self, request: &WelcomeMessageRequest) -> Result<(), AppError> {
        self.post(WELCOME_MESSAGE_PATH, request).await
    }
}
