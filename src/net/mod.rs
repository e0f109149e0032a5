//! Networking modules for the portal REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` moves bytes, `normalize` turns raw responses into envelopes
//! or errors, `client` layers the one-shot session refresh on top, and `api`
//! maps each endpoint to a typed call. `types` defines the wire schema.

pub mod api;
pub mod client;
pub mod error;
pub mod normalize;
pub mod transport;
pub mod types;

#[cfg(test)]
#[path = "scripted_test.rs"]
pub(crate) mod scripted;
