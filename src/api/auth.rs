use super::client::{StoreClient, LOGIN_PATH};
use crate::core::prelude::*;
use crate::session::User;
use serde_json::{json, Value};

/// Result of verifying a stored token on startup.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionRestore {
    /// No token stored.
    Anonymous,
    Restored(User),
    /// The store rejected the token; it has been removed.
    Expired,
}

impl StoreClient {
    /// `auth/login` then `auth/me`. The token is persisted before the user
    /// lookup so a failed lookup still leaves a clearable session.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let body = self
            .post(LOGIN_PATH, &json!({ "email": email, "password": password }))
            .await?;

        let token = body
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Decode("Login response carries no token".into()))?;
        self.session().set_token(token)?;

        match self.me().await {
            Ok(user) => {
                self.session().authenticate(user.clone());
                Ok(user)
            }
            Err(e) => {
                self.session().clear();
                Err(e)
            }
        }
    }

    pub async fn me(&self) -> Result<User> {
        let value = self.get("auth/me").await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Verifies a token kept from an earlier run.
    pub async fn restore_session(&self) -> Result<SessionRestore> {
        let has_token = self.session().init().unwrap_or_else(|e| {
            log::warn!("Unreadable session file, discarding it: {}", e);
            self.session().clear();
            false
        });
        if !has_token {
            return Ok(SessionRestore::Anonymous);
        }
        match self.me().await {
            Ok(user) => {
                self.session().authenticate(user.clone());
                Ok(SessionRestore::Restored(user))
            }
            Err(e) if e.is_auth() => Ok(SessionRestore::Expired),
            Err(e) => {
                log::warn!("Stored session could not be verified: {}", e);
                self.session().clear();
                Ok(SessionRestore::Expired)
            }
        }
    }

    pub fn logout(&self) {
        self.session().clear();
    }
}
