//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session credential never appears here: it lives in HTTP-only cookies
//! inside the transport. This store only tracks who the UI believes is
//! signed in, persists that to local storage, and notifies observers.
//!
//! DESIGN
//! ======
//! `AuthStore` is an explicit value, not a global, so tests can build as
//! many isolated instances as they need. Mutations are synchronous and go
//! through `watch::Sender::send_modify`; every subscriber sees each change.
//! The persisted record is exactly the serialized [`AuthState`], so only
//! `user` and `isAuthenticated` ever reach storage.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::storage::{Storage, load_json, save_json};
use crate::net::types::UserProfile;

/// Local storage key for the persisted auth record.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

/// Current user plus the authenticated flag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub is_authenticated: bool,
}

/// Observable, persisted auth state.
pub struct AuthStore {
    state: watch::Sender<AuthState>,
    storage: Box<dyn Storage>,
}

impl AuthStore {
    /// Rehydrate from `storage`. A missing or unreadable record means logged out.
    pub fn load(storage: impl Storage + 'static) -> Self {
        let initial = match load_json::<AuthState>(&storage, AUTH_STORAGE_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => AuthState::default(),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable auth record");
                AuthState::default()
            }
        };
        let (state, _) = watch::channel(initial);
        Self { state, storage: Box::new(storage) }
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().user.clone()
    }

    /// Observe every subsequent change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Record a signed-in user.
    pub fn set_user(&self, profile: UserProfile) {
        self.mutate(|state| {
            state.user = Some(profile);
            state.is_authenticated = true;
        });
    }

    /// Forget the user. The backend owns cookie invalidation.
    pub fn logout(&self) {
        self.mutate(|state| {
            state.user = None;
            state.is_authenticated = false;
        });
    }

    /// Merge `patch` into the current profile without touching the flag.
    pub fn update_user(&self, patch: UserProfile) {
        self.mutate(|state| {
            state.user.get_or_insert_with(UserProfile::default).merge(patch);
        });
    }

    fn mutate(&self, apply: impl FnOnce(&mut AuthState)) {
        self.state.send_modify(apply);
        self.persist();
    }

    fn persist(&self) {
        let state = self.snapshot();
        if let Err(e) = save_json(self.storage.as_ref(), AUTH_STORAGE_KEY, &state) {
            tracing::warn!(error = %e, "failed to persist auth state");
        }
    }
}
