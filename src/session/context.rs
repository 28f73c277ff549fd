use super::store::TokenStore;
use crate::core::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Account returned by `auth/me`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Anonymous,
    /// Token known (restored or fresh from login) but not yet confirmed by `auth/me`.
    Pending(String),
    Authenticated { token: String, user: User },
}

/// Process-wide session, injected into the store client.
///
/// Lifecycle: `init` on startup, `set_token`/`authenticate` on login,
/// `clear` on logout or when the store rejects the credential.
#[derive(Debug)]
pub struct SessionContext {
    store: TokenStore,
    state: RwLock<SessionState>,
}

impl SessionContext {
    pub fn new(store: TokenStore) -> Self {
        Self {
            store,
            state: RwLock::new(SessionState::Anonymous),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Loads a stored token; it stays `Pending` until verified.
    pub fn init(&self) -> Result<bool> {
        match self.store.load()? {
            Some(token) => {
                log::debug!("Stored session token found at {}", self.store.path().display());
                *self.write() = SessionState::Pending(token);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn state(&self) -> SessionState {
        self.read().clone()
    }

    pub fn bearer(&self) -> Option<String> {
        match &*self.read() {
            SessionState::Anonymous => None,
            SessionState::Pending(token) | SessionState::Authenticated { token, .. } => {
                Some(token.clone())
            }
        }
    }

    pub fn set_token(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        self.store.save(&token)?;
        *self.write() = SessionState::Pending(token);
        Ok(())
    }

    pub fn authenticate(&self, user: User) {
        let mut state = self.write();
        let token = match &*state {
            SessionState::Pending(token) | SessionState::Authenticated { token, .. } => {
                token.clone()
            }
            SessionState::Anonymous => {
                log::warn!("Ignoring user {} without a session token", user.email);
                return;
            }
        };
        log::info!("Session authenticated as {}", user.email);
        *state = SessionState::Authenticated { token, user };
    }

    /// Drops the in-memory and the stored credential.
    pub fn clear(&self) {
        let had_session = !matches!(*self.read(), SessionState::Anonymous);
        *self.write() = SessionState::Anonymous;
        if let Err(e) = self.store.remove() {
            log::warn!("Failed to remove stored session token: {}", e);
        }
        if had_session {
            log::info!("Session cleared");
        }
    }

    pub fn user(&self) -> Option<User> {
        match &*self.read() {
            SessionState::Authenticated { user, .. } => Some(user.clone()),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.read(), SessionState::Authenticated { .. })
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.store
    }
}
