//! API client with one-shot session refresh.
//!
//! DESIGN
//! ======
//! Each call runs a small state machine tagged by [`Attempt`]:
//!
//! - `Initial`: the request goes out as-is.
//! - A normalized 401 on a non-exempt route moves to `RefreshAttempted`:
//!   `POST /auth/refresh` is issued, and on success the original request is
//!   replayed exactly once. A failed refresh returns the refresh error.
//! - Anything else, or any outcome once refreshed, is returned unchanged.
//!
//! The tag lives on the stack of the call, never on the request value, so a
//! replay cannot be confused with a fresh call. Login, signup, and the
//! refresh route itself are exempt, which rules out refresh loops while the
//! user is authenticating.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::normalize::normalize;
use super::transport::{ApiRequest, Transport};
use super::types::Envelope;

pub const LOGIN_PATH: &str = "/auth/login";
pub const SIGNUP_PATH: &str = "/auth/signup";
pub const REFRESH_PATH: &str = "/auth/refresh";

const REFRESH_EXEMPT_ROUTES: [&str; 3] = [LOGIN_PATH, SIGNUP_PATH, REFRESH_PATH];

/// Per-call refresh state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Attempt {
    #[default]
    Initial,
    RefreshAttempted,
}

/// Routes whose 401s are final: authentication itself and the refresh call.
///
/// Leading and trailing `/` are ignored, matching how the transport joins
/// paths onto the base URL.
#[must_use]
pub fn is_refresh_exempt(route: &str) -> bool {
    let route = route.trim_matches('/');
    REFRESH_EXEMPT_ROUTES.iter().any(|exempt| exempt.trim_start_matches('/') == route)
}

fn should_refresh(err: &ApiError, request: &ApiRequest, attempt: Attempt) -> bool {
    err.is_unauthorized() && attempt == Attempt::Initial && !is_refresh_exempt(request.route())
}

/// Portal API client over any [`Transport`].
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request`, refreshing the session and replaying once on a 401.
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the final attempt, or the refresh
    /// error when the refresh itself fails.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Envelope<Value>, ApiError> {
        let mut attempt = Attempt::Initial;
        loop {
            match self.send_once(request).await {
                Err(err) if should_refresh(&err, request, attempt) => {
                    attempt = Attempt::RefreshAttempted;
                    tracing::info!(path = %request.path, "session rejected; attempting refresh");
                    if let Err(refresh_err) = self.send_once(&ApiRequest::post(REFRESH_PATH)).await {
                        tracing::warn!(path = %request.path, error = %refresh_err, "session refresh failed");
                        return Err(refresh_err);
                    }
                    tracing::debug!(path = %request.path, "session refreshed; replaying request");
                }
                outcome => return outcome,
            }
        }
    }

    /// Execute and decode the payload into `D`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiClient::execute`] errors and payload decode failures.
    pub async fn call<D: DeserializeOwned>(&self, request: ApiRequest) -> Result<Envelope<D>, ApiError> {
        self.execute(&request).await?.decode()
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn get<D: DeserializeOwned>(&self, path: &str) -> Result<Envelope<D>, ApiError> {
        self.call(ApiRequest::get(path)).await
    }

    /// `POST path` without a body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn post<D: DeserializeOwned>(&self, path: &str) -> Result<Envelope<D>, ApiError> {
        self.call(ApiRequest::post(path)).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized, otherwise
    /// see [`ApiClient::call`].
    pub async fn post_json<D, B>(&self, path: &str, body: &B) -> Result<Envelope<D>, ApiError>
    where
        D: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.call(ApiRequest::post(path).with_body(body)).await
    }

    async fn send_once(&self, request: &ApiRequest) -> Result<Envelope<Value>, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, "api request");
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(path = %request.path, error = %err, "no response from backend");
                return Err(err.into());
            }
        };
        tracing::debug!(path = %request.path, status = response.status, "api response");
        normalize(response)
    }
}
