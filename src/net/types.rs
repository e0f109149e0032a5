//! Wire DTOs for the portal REST API.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON. Every response is wrapped
//! in an [`Envelope`]; layers above the normalizer hand the whole envelope
//! back and callers unwrap `data` where they use it.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::ApiError;

// =============================================================================
// ENVELOPE
// =============================================================================

/// Standard response wrapper `{success, code, message, data}`.
///
/// `code` is kept as the backend sent it; it is only trusted as a status
/// once [`normalize`](super::normalize::normalize) has range-checked it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Success envelope with no message and no payload, used for empty 2xx bodies.
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self { success: true, code: i64::from(status), message: String::new(), data: None }
    }

    /// The backend message, if it is not blank.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        let trimmed = self.message.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Take the payload out of a successful envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingData`] when `data` is absent or `null`.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data.ok_or(ApiError::MissingData)
    }
}

impl Envelope<Value> {
    /// Decode the raw JSON payload into a typed one, keeping the rest of the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `data` does not match `D`.
    pub fn decode<D: DeserializeOwned>(self) -> Result<Envelope<D>, ApiError> {
        let data = match self.data {
            Some(Value::Null) | None => None,
            Some(raw) => Some(serde_json::from_value(raw).map_err(|e| ApiError::Decode(e.to_string()))?),
        };
        Ok(Envelope { success: self.success, code: self.code, message: self.message, data })
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// USER
// =============================================================================

/// Non-sensitive user profile shown by the client.
///
/// Unknown backend fields (ids, timestamps, password hashes) are dropped on
/// deserialization, so nothing credential-like can reach persisted state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserProfile {
    /// Profile carrying only a username.
    #[must_use]
    pub fn with_username(username: impl Into<String>) -> Self {
        Self { username: Some(username.into()), ..Self::default() }
    }

    /// Overwrite every field that `patch` sets; leave the rest alone.
    pub fn merge(&mut self, patch: UserProfile) {
        if patch.username.is_some() {
            self.username = patch.username;
        }
        if patch.name.is_some() {
            self.name = patch.name;
        }
        if patch.email.is_some() {
            self.email = patch.email;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
    }

    /// Name for headers and greetings: display name, then username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.username.as_deref())
            .unwrap_or("unknown user")
    }
}

// =============================================================================
// AUTH PAYLOADS
// =============================================================================

/// `POST /auth/login` body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `POST /auth/login` payload. Any token the backend echoes is ignored; the
/// session lives in HTTP-only cookies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// `POST /auth/signup` body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .finish()
    }
}

/// Result of `check-email` / `check-username`: either a bare boolean or
/// `{ "available": bool }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Availability {
    Flag(bool),
    Detailed { available: bool },
}

impl Availability {
    #[must_use]
    pub fn is_available(self) -> bool {
        match self {
            Self::Flag(available) | Self::Detailed { available } => available,
        }
    }
}

// =============================================================================
// PROJECTS
// =============================================================================

/// A project listed on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_code: String,
    pub project_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub is_joined: bool,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// `GET /portal/projects/{code}/access` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAccess {
    pub url: String,
}
