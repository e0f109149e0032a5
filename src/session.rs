//! Session orchestration: API calls plus the auth store they update.
//!
//! SYSTEM CONTEXT
//! ==============
//! Front ends call these methods from user actions. Server state (cookies,
//! profile) comes from the API; client state (who is shown as signed in)
//! lives in the [`AuthStore`]. Only [`Session::restore`] swallows errors:
//! on startup, "no session" is the expected answer for a logged-out user.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde_json::Value;

use crate::forms::{SignupForm, ValidationError, validate_login_input, validate_project_code, validate_signup_input};
use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::error::ApiError;
use crate::net::transport::Transport;
use crate::net::types::{Availability, Envelope, ProjectAccess, UserProfile};
use crate::state::auth::AuthStore;
use crate::state::projects::ProjectBoard;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SessionError {
    /// Underlying API error, if the failure came from the backend.
    #[must_use]
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            Self::Validation(_) => None,
        }
    }
}

pub struct Session<T> {
    client: ApiClient<T>,
    store: AuthStore,
}

impl<T: Transport> Session<T> {
    #[must_use]
    pub fn new(client: ApiClient<T>, store: AuthStore) -> Self {
        Self { client, store }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    #[must_use]
    pub fn store(&self) -> &AuthStore {
        &self.store
    }

    /// Startup probe: ask the backend who is signed in.
    ///
    /// Never fails. An auth rejection clears stale persisted state; other
    /// failures (network, server) leave the store as it was.
    pub async fn restore(&self) -> Option<UserProfile> {
        match api::fetch_current_user(&self.client).await.and_then(Envelope::into_data) {
            Ok(profile) => {
                self.store.set_user(profile.clone());
                Some(profile)
            }
            Err(err) => {
                tracing::debug!(error = %err, "no active session on startup");
                if err.is_auth_failure() && self.store.is_authenticated() {
                    self.store.logout();
                }
                None
            }
        }
    }

    /// Validate, log in, and record the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the API error of
    /// the login or profile call.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile, SessionError> {
        let credentials = validate_login_input(username, password)?;
        let envelope = api::login(&self.client, &credentials).await?;
        let embedded = envelope.data.and_then(|data| data.user);
        let profile = match embedded {
            Some(profile) => profile,
            None => api::fetch_current_user(&self.client).await?.into_data()?,
        };
        tracing::info!(username = %credentials.username, "logged in");
        self.store.set_user(profile.clone());
        Ok(profile)
    }

    /// Log out on the backend, then clear local state.
    ///
    /// # Errors
    ///
    /// Returns the API error; local state is kept when the call fails.
    pub async fn logout(&self) -> Result<(), SessionError> {
        api::logout(&self.client).await?;
        self.store.logout();
        tracing::info!("logged out");
        Ok(())
    }

    /// Re-fetch the profile and store it.
    ///
    /// # Errors
    ///
    /// Returns the API error of `GET /auth/user`.
    pub async fn refresh_user(&self) -> Result<UserProfile, SessionError> {
        let profile = api::fetch_current_user(&self.client).await?.into_data()?;
        self.store.set_user(profile.clone());
        Ok(profile)
    }

    /// Explicitly rotate the session cookie.
    ///
    /// # Errors
    ///
    /// Returns the API error of `POST /auth/refresh`.
    pub async fn refresh_session(&self) -> Result<(), SessionError> {
        api::refresh_session(&self.client).await?;
        Ok(())
    }

    /// Validate the form and create the account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the API error.
    pub async fn signup(&self, form: &SignupForm) -> Result<Envelope<Value>, SessionError> {
        let request = validate_signup_input(form)?;
        Ok(api::signup(&self.client, &request).await?)
    }

    /// # Errors
    ///
    /// Returns the API error, or [`ApiError::MissingData`] if no answer was given.
    pub async fn email_available(&self, email: &str) -> Result<bool, SessionError> {
        let answer: Availability = api::check_email(&self.client, email.trim()).await?.into_data()?;
        Ok(answer.is_available())
    }

    /// # Errors
    ///
    /// Returns the API error, or [`ApiError::MissingData`] if no answer was given.
    pub async fn username_available(&self, username: &str) -> Result<bool, SessionError> {
        let answer: Availability = api::check_username(&self.client, username.trim()).await?.into_data()?;
        Ok(answer.is_available())
    }

    /// # Errors
    ///
    /// Returns the API error.
    pub async fn verify_email(&self, token: &str) -> Result<Envelope<Value>, SessionError> {
        Ok(api::verify_email(&self.client, token.trim()).await?)
    }

    /// Fetch projects grouped for the dashboard. A missing payload is an empty board.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn dashboard(&self) -> Result<ProjectBoard, SessionError> {
        let projects = api::fetch_projects(&self.client).await?.data.unwrap_or_default();
        Ok(ProjectBoard::from_projects(projects))
    }

    /// # Errors
    ///
    /// Returns a validation error for a malformed code, or the API error.
    pub async fn join(&self, project_code: &str) -> Result<Envelope<Value>, SessionError> {
        let code = validate_project_code(project_code)?;
        Ok(api::join_project(&self.client, &code).await?)
    }

    /// # Errors
    ///
    /// Returns a validation error for a malformed code, or the API error.
    pub async fn access(&self, project_code: &str) -> Result<ProjectAccess, SessionError> {
        let code = validate_project_code(project_code)?;
        Ok(api::access_project(&self.client, &code).await?.into_data()?)
    }
}
