use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::store::{SessionStore, StoreError, AUTH_TOKEN_KEY, SESSION_KEYS, USER_INFO_KEY};
use crate::config::Config;
use crate::nav::Navigator;

/// Shown when no username is stored.
pub const FALLBACK_USERNAME: &str = "User";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Session storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Stored user info is not valid JSON: {0}")]
    CorruptUserInfo(#[source] serde_json::Error),

    #[error("Failed to encode user info: {0}")]
    Encode(#[source] serde_json::Error),
}

/// The signed-in user as returned by the evaluator API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Fields this client does not model, kept so they round-trip.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl UserInfo {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            id: None,
            email: None,
            full_name: None,
            is_active: None,
            is_admin: None,
            created_at: None,
            extra: serde_json::Map::new(),
        }
    }
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Body of a successful `POST /auth/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: UserInfo,
}

/// Local, client-side session checks and redirects.
///
/// Nothing here talks to the server: a token is trusted until the API
/// rejects it with a 401, at which point the API client clears it.
#[derive(Clone)]
pub struct Auth {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
    home_path: String,
}

impl Auth {
    pub fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self::from_config(&Config::default(), store, navigator)
    }

    pub fn from_config(
        config: &Config,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            navigator,
            login_path: config.login_path.clone(),
            home_path: config.home_path.clone(),
        }
    }

    /// The stored bearer token, if any. An unreadable store counts as empty.
    pub fn token(&self) -> Option<String> {
        match self.store.get(AUTH_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read auth token");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Parse the stored user record.
    ///
    /// Returns `Ok(None)` when nothing (or JSON `null`) is stored and
    /// [`AuthError::CorruptUserInfo`] when the stored text does not parse.
    pub fn user_info(&self) -> Result<Option<UserInfo>, AuthError> {
        let Some(raw) = self.store.get(USER_INFO_KEY)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(&raw).map_err(AuthError::CorruptUserInfo)?;
        if value.is_null() {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(AuthError::CorruptUserInfo)
    }

    pub fn username(&self) -> String {
        match self.user_info() {
            Ok(Some(info)) if !info.username.is_empty() => info.username,
            Ok(_) => FALLBACK_USERNAME.to_string(),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable user info");
                FALLBACK_USERNAME.to_string()
            }
        }
    }

    /// Guard for protected pages: redirects to login when signed out.
    pub fn require_auth(&self) -> bool {
        if !self.is_authenticated() {
            self.navigator.navigate(&self.login_path);
            return false;
        }
        true
    }

    /// Guard for login/signup pages: sends signed-in users to
    /// `destination` (the configured home page when `None`).
    pub fn redirect_if_authenticated(&self, destination: Option<&str>) -> bool {
        if self.is_authenticated() {
            self.navigator
                .navigate(destination.unwrap_or(&self.home_path));
            return true;
        }
        false
    }

    /// Persist a fresh login. Token and user record are written together.
    pub fn store_login(&self, login: &TokenResponse) -> Result<(), AuthError> {
        let user_json = serde_json::to_string(&login.user).map_err(AuthError::Encode)?;
        self.store.set_all(&[
            (AUTH_TOKEN_KEY, login.access_token.as_str()),
            (USER_INFO_KEY, user_json.as_str()),
        ])?;
        debug!(username = %login.user.username, "Stored login session");
        Ok(())
    }

    /// Clear the session and go to the login page. The redirect happens even
    /// when clearing fails.
    pub fn logout(&self) -> Result<(), AuthError> {
        let cleared = self.store.remove_all(&SESSION_KEYS);
        self.navigator.navigate(&self.login_path);
        cleared.map_err(AuthError::from)
    }
}
