//! Client-side state.
//!
//! ARCHITECTURE
//! ============
//! `auth` holds who is signed in, `projects` shapes the dashboard listing,
//! and `storage` is the local key/value backend the auth store persists to.

pub mod auth;
pub mod projects;
pub mod storage;
