//! Session store: current identity, mock login and logout, persisted cache.
//!
//! ARCHITECTURE
//! ============
//! The store is an explicitly constructed container held by `AppState`. It
//! tracks at most one identity at a time and mirrors it into a
//! `KeyValueStore` under two keys: the serialized identity and the opaque
//! token. Page handlers consult it to gate rendering; the route guard never
//! does.
//!
//! ERROR HANDLING
//! ==============
//! Restoring from a cache entry that is missing, unparseable, not an object,
//! or lacks an `id` clears both keys and leaves the store signed out. Cache
//! write failures are logged and do not fail login or logout.

use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::ConsoleError;
use crate::paths;
use crate::services::kv::KeyValueStore;

/// Cache key holding the serialized identity.
pub const USER_KEY: &str = "jacon_user";
/// Cache key holding the opaque session token.
pub const TOKEN_KEY: &str = "jacon_token";

/// The single credential pair the mock login accepts.
pub const MOCK_EMAIL: &str = "admin@jacon.io";
pub const MOCK_PASSWORD: &str = "admin";

/// Signed-in user's profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Role label, matched against role fixtures by the policy check.
    pub role: String,
}

/// Identity plus the token issued alongside it.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user: Identity,
    pub token: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSnapshot {
    pub user: Option<Identity>,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub loading: bool,
}

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

fn mock_admin() -> Identity {
    Identity {
        id: "usr-0001".into(),
        name: "Jacon Admin".into(),
        email: MOCK_EMAIL.into(),
        role: "Administrator".into(),
    }
}

/// Mock credential check. Sleeps for `delay`, then accepts only the
/// hardcoded pair.
///
/// # Errors
///
/// Returns `InvalidCredentials` for any other pair.
pub async fn mock_login(email: &str, password: &str, delay: Duration) -> Result<Session, ConsoleError> {
    tokio::time::sleep(delay).await;
    if email == MOCK_EMAIL && password == MOCK_PASSWORD {
        Ok(Session { user: mock_admin(), token: generate_token() })
    } else {
        Err(ConsoleError::InvalidCredentials)
    }
}

/// Parse a cached identity, rejecting anything without a non-empty string `id`.
pub(crate) fn parse_cached_identity(raw: &str) -> Option<Identity> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let has_id = value
        .as_object()?
        .get("id")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|id| !id.is_empty());
    if !has_id {
        return None;
    }
    serde_json::from_value(value).ok()
}

// =============================================================================
// STORE
// =============================================================================

pub struct SessionStore {
    cache: Arc<dyn KeyValueStore>,
    mock_delay: Duration,
    inner: RwLock<SessionSnapshot>,
}

impl SessionStore {
    /// New store in the loading state. Call [`SessionStore::restore`] once at start-up.
    #[must_use]
    pub fn new(cache: Arc<dyn KeyValueStore>, mock_delay: Duration) -> Self {
        Self {
            cache,
            mock_delay,
            inner: RwLock::new(SessionSnapshot { user: None, token: None, loading: true }),
        }
    }

    /// Load the identity from the persisted cache.
    pub async fn restore(&self) {
        let restored = match self.cache.get(USER_KEY) {
            Ok(Some(raw)) => parse_cached_identity(&raw),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "session cache read failed");
                None
            }
        };

        let mut inner = self.inner.write().await;
        match restored {
            Some(user) => {
                let token = self.cache.get(TOKEN_KEY).unwrap_or_else(|e| {
                    warn!(error = %e, "session token read failed");
                    None
                });
                info!(user_id = %user.id, "session restored from cache");
                inner.user = Some(user);
                inner.token = token;
            }
            None => {
                self.clear_cache();
                inner.user = None;
                inner.token = None;
            }
        }
        inner.loading = false;
    }

    /// Sign in through the mock credential check.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` when the mock rejects the pair. The
    /// current identity is left untouched in that case.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ConsoleError> {
        let result = mock_login(email, password, self.mock_delay).await;

        let mut inner = self.inner.write().await;
        inner.loading = false;
        let session = result?;

        match serde_json::to_string(&session.user) {
            Ok(raw) => {
                if let Err(e) = self.cache.set(USER_KEY, &raw) {
                    warn!(error = %e, "failed to persist identity");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize identity"),
        }
        if let Err(e) = self.cache.set(TOKEN_KEY, &session.token) {
            warn!(error = %e, "failed to persist session token");
        }

        inner.user = Some(session.user.clone());
        inner.token = Some(session.token.clone());
        info!(user_id = %session.user.id, "signed in");
        Ok(session)
    }

    /// Drop the identity, token and cache entries. Never fails.
    pub async fn logout(&self) {
        let mut inner = self.inner.write().await;
        if let Some(user) = inner.user.take() {
            info!(user_id = %user.id, "signed out");
        }
        inner.token = None;
        inner.loading = false;
        self.clear_cache();
    }

    pub async fn identity(&self) -> Option<Identity> {
        self.inner.read().await.user.clone()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.read().await.clone()
    }

    /// Navigation the console should perform for `path`, if any.
    ///
    /// Once initialization has finished, a protected path with no identity
    /// sends the visitor to the sign-in entry point.
    pub async fn redirect_for(&self, path: &str) -> Option<&'static str> {
        let inner = self.inner.read().await;
        if inner.loading || inner.user.is_some() || !paths::is_protected_path(path) {
            return None;
        }
        debug!(path, "no identity for protected path");
        Some(paths::LOGIN_PATH)
    }

    fn clear_cache(&self) {
        for key in [USER_KEY, TOKEN_KEY] {
            if let Err(e) = self.cache.remove(key) {
                warn!(key, error = %e, "failed to clear session cache entry");
            }
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
