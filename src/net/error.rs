//! Error types for portal API calls.
//!
//! Every failure a caller can see is an [`ApiError`] whose `Display` is the
//! user-facing message; transport details stay on the variant for logging.

/// Message shown when no response was received at all.
pub const NETWORK_ERROR_MESSAGE: &str = "network error: unable to reach the server";

/// Failure to obtain any HTTP response from the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be built (bad URL, unserializable body).
    #[error("request build failed: {0}")]
    Build(String),

    /// Connection, DNS, or TLS failure before any status line arrived.
    #[error("request failed: {0}")]
    Send(String),
}

/// Normalized failure of a portal API call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success status or a `success: false`
    /// envelope. `status` is the effective status: the envelope `code` when
    /// the HTTP status was 2xx, otherwise the HTTP status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// No response was received.
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network { detail: String },

    /// A 2xx body did not match the expected envelope or payload shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// A request body could not be serialized to JSON.
    #[error("request body could not be encoded: {0}")]
    Encode(String),

    /// The envelope reported success but carried no `data`.
    #[error("response carried no data")]
    MissingData,
}

impl ApiError {
    /// Effective HTTP-like status, when the backend produced one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network { .. } | Self::Decode(_) | Self::Encode(_) | Self::MissingData => None,
        }
    }

    /// True for 401, the only status that triggers a session refresh.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// True when the backend rejected the session itself (401 or 403).
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::Network { detail: err.to_string() }
    }
}
