//! HTTP transport: one request out, one raw response back.
//!
//! DESIGN
//! ======
//! `Transport` is the seam between request policy (`client`) and the wire.
//! The reqwest implementation owns a cookie jar so the backend's HTTP-only
//! session cookies ride along on every call without the crate ever reading
//! them. No retries and no timeouts beyond reqwest defaults live here.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::Value;

use super::error::TransportError;

/// A request relative to the configured base path.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// `GET path`. A missing leading `/` is added.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::GET, path: rooted(path.into()), body: None }
    }

    /// `POST path`. A missing leading `/` is added.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self { method: Method::POST, path: rooted(path.into()), body: None }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Path without any query string, trailing `/`, or leading `/`.
    ///
    /// `auth/login` and `/auth/login/` name the same route.
    #[must_use]
    pub fn route(&self) -> &str {
        self.path.split('?').next().unwrap_or_default().trim_matches('/')
    }
}

fn rooted(path: String) -> String {
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}

/// Status plus parsed JSON body. `body` is `None` for empty or non-JSON bodies.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a single request and reports whatever came back.
///
/// Implementations must not retry or interpret statuses; an `Err` means no
/// response was received.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;
}

/// reqwest-backed transport with a fixed base URL, JSON headers, and an
/// in-process cookie store.
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Build a transport rooted at `base_url` (e.g. `http://127.0.0.1:8080/api`).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let url = self.url_for(&request.path);
        let builder = self.http.request(request.method.clone(), &url);
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| TransportError::Send(e.to_string()))?;
        let status = response.status().as_u16();
        // The status line arrived, so a broken body is still a response.
        let body = match response.text().await {
            Ok(text) => {
                let body = parse_body(&text);
                if body.is_none() && !text.trim().is_empty() {
                    tracing::debug!(%status, url = %url, "response body is not JSON");
                }
                body
            }
            Err(e) => {
                tracing::warn!(%status, url = %url, error = %e, "response body read failed");
                None
            }
        };
        Ok(RawResponse { status, body })
    }
}

fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;
