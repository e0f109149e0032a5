//! Portal client — REST access, session refresh, and persisted auth state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The portal backend sits behind a same-origin reverse proxy under `/api`
//! and owns every business rule. This crate only talks to it: `net` issues
//! requests and normalizes the response envelope, `state` keeps the current
//! user, and `session` ties the two together for the `portal` binary.

pub mod config;
pub mod forms;
pub mod net;
pub mod session;
pub mod state;

pub use config::ClientConfig;
pub use net::client::ApiClient;
pub use net::error::ApiError;
pub use net::transport::{ReqwestTransport, Transport};
pub use net::types::{Envelope, UserProfile};
pub use session::{Session, SessionError};
pub use state::auth::{AuthState, AuthStore};
