//! Wire types for the admissions backend and the welcome API.
//!
//! Field names follow the backend's camelCase JSON. Request types carrying a
//! password deliberately do not derive `Debug`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `{ success, data?, error? }` response envelope.
#[derive(Clone, Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// # Errors
    ///
    /// Returns `Api` when `success` is false and `Parse` when a successful
    /// envelope carries no payload.
    pub fn into_result(self) -> Result<T, AppError> {
        if !self.success {
            let message = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "The request was not successful.".to_owned());
            return Err(AppError::Api(message));
        }
        self.data
            .ok_or_else(|| AppError::Parse("Response is missing its data payload.".to_owned()))
    }
}

/// `POST /auth/register` body.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub program: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub uid: String,
}

/// `PUT /users/update` body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub program: String,
}

/// Where a student's application currently stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Draft,
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
    Waitlisted,
    #[serde(other)]
    Unknown,
}

impl ApplicationStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::UnderReview => "Under review",
            Self::Accepted => "Accepted",
            Self::Rejected => "Not admitted",
            Self::Waitlisted => "Waitlisted",
            Self::Unknown => "Unknown",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Draft => "Complete your profile and submit your application.",
            Self::Submitted => "We received your application and will begin review shortly.",
            Self::UnderReview => "The admissions committee is reviewing your application.",
            Self::Accepted => "Congratulations! Check your email for next steps.",
            Self::Rejected => "We were unable to offer you admission this cycle.",
            Self::Waitlisted => "You are on the waitlist. We will contact you if a place opens.",
            Self::Unknown => "Your application status is not available right now.",
        }
    }

    /// Whether the committee has made a final call.
    pub fn is_decided(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

/// Student profile as stored by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub application_status: ApplicationStatus,
    #[serde(default)]
    pub submitted_at: Option<String>,
}

impl StudentProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim()).trim().to_owned()
    }

    /// Editable subset, used to prefill the profile form.
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
            program: self.program.clone(),
        }
    }
}

/// `POST /api/welcome/email` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeEmailRequest {
    pub user_email: String,
    pub user_name: String,
    pub is_first_login: bool,
}

/// `POST /api/welcome/whatsapp` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMessageRequest {
    pub phone_number: String,
    pub user_name: String,
    pub is_first_login: bool,
}
