//! Endpoint helpers for the portal backend.
//!
//! Each function maps one call to a verb, path, and payload. Transport,
//! normalization, and session refresh all come from [`ApiClient`]; nothing
//! here catches or rewrites errors, and every function hands back the full
//! envelope.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::{Value, json};

use super::client::{ApiClient, LOGIN_PATH, REFRESH_PATH, SIGNUP_PATH};
use super::error::ApiError;
use super::transport::Transport;
use super::types::{Availability, Envelope, LoginData, LoginRequest, Project, ProjectAccess, SignupRequest, UserProfile};

pub const LOGOUT_PATH: &str = "/auth/logout";
pub const CURRENT_USER_PATH: &str = "/auth/user";
pub const CHECK_EMAIL_PATH: &str = "/auth/check-email";
pub const CHECK_USERNAME_PATH: &str = "/auth/check-username";
pub const VERIFY_EMAIL_PATH: &str = "/auth/verify-email";
pub const PROJECTS_PATH: &str = "/portal/projects";

fn project_join_endpoint(project_code: &str) -> String {
    format!("{PROJECTS_PATH}/{project_code}/join")
}

fn project_access_endpoint(project_code: &str) -> String {
    format!("{PROJECTS_PATH}/{project_code}/access")
}

// =============================================================================
// AUTH
// =============================================================================

/// `POST /auth/login`. The session cookie is set by the backend.
///
/// # Errors
///
/// Returns the normalized API error; a 401 here is never refreshed.
pub async fn login<T: Transport>(client: &ApiClient<T>, credentials: &LoginRequest) -> Result<Envelope<LoginData>, ApiError> {
    client.post_json(LOGIN_PATH, credentials).await
}

/// `POST /auth/logout`. The backend clears the session cookies.
///
/// # Errors
///
/// Returns the normalized API error.
pub async fn logout<T: Transport>(client: &ApiClient<T>) -> Result<Envelope<Value>, ApiError> {
    client.post(LOGOUT_PATH).await
}

/// `POST /auth/refresh`, called explicitly. Rotates the session cookie.
///
/// # Errors
///
/// Returns the normalized API error.
pub async fn refresh_session<T: Transport>(client: &ApiClient<T>) -> Result<Envelope<Value>, ApiError> {
    client.post(REFRESH_PATH).await
}

/// `GET /auth/user`: the profile behind the current session.
///
/// # Errors
///
/// Returns the normalized API error.
pub async fn fetch_current_user<T: Transport>(client: &ApiClient<T>) -> Result<Envelope<UserProfile>, ApiError> {
    client.get(CURRENT_USER_PATH).await
}

// =============================================================================
// SIGNUP
// =============================================================================

/// `POST /auth/signup`.
///
/// # Errors
///
/// Returns the normalized API error (e.g. username already taken).
pub async fn signup<T: Transport>(client: &ApiClient<T>, request: &SignupRequest) -> Result<Envelope<Value>, ApiError> {
    client.post_json(SIGNUP_PATH, request).await
}

/// `POST /auth/check-email`.
///
/// # Errors
///
/// Returns the normalized API error.
pub async fn check_email<T: Transport>(client: &ApiClient<T>, email: &str) -> Result<Envelope<Availability>, ApiError> {
    client.post_json(CHECK_EMAIL_PATH, &json!({ "email": email })).await
}

/// `POST /auth/check-username`.
///
/// # Errors
///
/// Returns the normalized API error.
pub async fn check_username<T: Transport>(
    client: &ApiClient<T>,
    username: &str,
) -> Result<Envelope<Availability>, ApiError> {
    client.post_json(CHECK_USERNAME_PATH, &json!({ "username": username })).await
}

/// `POST /auth/verify-email`.
///
/// # Errors
///
/// Returns the normalized API error.
pub async fn verify_email<T: Transport>(client: &ApiClient<T>, token: &str) -> Result<Envelope<Value>, ApiError> {
    client.post_json(VERIFY_EMAIL_PATH, &json!({ "token": token })).await
}

// =============================================================================
// PROJECTS
// =============================================================================

/// `GET /portal/projects`.
///
/// # Errors
///
/// Returns the normalized API error.
pub async fn fetch_projects<T: Transport>(client: &ApiClient<T>) -> Result<Envelope<Vec<Project>>, ApiError> {
    client.get(PROJECTS_PATH).await
}

/// `POST /portal/projects/{code}/join`.
///
/// # Errors
///
/// Returns the normalized API error.
pub async fn join_project<T: Transport>(client: &ApiClient<T>, project_code: &str) -> Result<Envelope<Value>, ApiError> {
    client.post(&project_join_endpoint(project_code)).await
}

/// `GET /portal/projects/{code}/access`: the URL to open the project at.
///
/// # Errors
///
/// Returns the normalized API error.
pub async fn access_project<T: Transport>(
    client: &ApiClient<T>,
    project_code: &str,
) -> Result<Envelope<ProjectAccess>, ApiError> {
    client.get(&project_access_endpoint(project_code)).await
}
