//! Response normalization: raw HTTP responses into envelopes or [`ApiError`]s.
//!
//! ERROR HANDLING
//! ==============
//! The backend reports some failures as HTTP 200 with `success: false` and
//! a `code` (for example an invalid refresh token yields `code: 401`), so the
//! effective status of an error is the envelope code on 2xx responses and the
//! HTTP status otherwise. A code outside 100..=599 (`-1`, `0`, app-specific
//! numbers) is not a status, so the HTTP status stands in for it. A blank backend message falls back to a fixed
//! per-status default so callers never display an empty string.

#[cfg(test)]
#[path = "normalize_test.rs"]
mod normalize_test;

use serde_json::Value;

use super::error::ApiError;
use super::transport::RawResponse;
use super::types::Envelope;

/// Default user-facing message for a status when the backend supplied none.
#[must_use]
pub fn default_status_message(status: u16) -> &'static str {
    match status {
        401 => "authentication failed",
        403 => "check credentials",
        404 => "resource not found",
        500 => "server error",
        _ => "request failed",
    }
}

/// Turn a raw response into a success envelope or a normalized error.
///
/// # Errors
///
/// Returns [`ApiError::Status`] for non-2xx responses and `success: false`
/// envelopes, and [`ApiError::Decode`] for 2xx bodies that are not envelopes.
pub fn normalize(response: RawResponse) -> Result<Envelope<Value>, ApiError> {
    let RawResponse { status, body } = response;

    if !(200..300).contains(&status) {
        let message = body.as_ref().and_then(body_message);
        return Err(status_error(status, message));
    }

    let Some(body) = body else {
        return Ok(Envelope::empty(status));
    };

    let envelope: Envelope<Value> =
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if envelope.success {
        return Ok(envelope);
    }

    let effective = envelope_status(envelope.code, status);
    Err(status_error(effective, envelope.message().map(str::to_owned)))
}

/// The envelope code when it is a plausible HTTP status, else `fallback`.
fn envelope_status(code: i64, fallback: u16) -> u16 {
    match u16::try_from(code) {
        Ok(code) if (100..=599).contains(&code) => code,
        _ => fallback,
    }
}

/// Build a status error, substituting the default message for a blank one.
#[must_use]
pub fn status_error(status: u16, message: Option<String>) -> ApiError {
    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| default_status_message(status).to_owned());
    ApiError::Status { status, message }
}

fn body_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}
