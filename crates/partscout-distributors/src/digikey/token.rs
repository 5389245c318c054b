//! OAuth2 token persistence for the DigiKey client.

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DistributorError;

/// Tokens within this many seconds of expiry are treated as stale.
const EXPIRY_SKEW_SECS: i64 = 60;

/// An access token as persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "Bearer".to_owned()
}

impl StoredToken {
    /// Builds a token that expires `expires_in_secs` after `now`.
    ///
    /// A lifetime that cannot be represented leaves the expiry unknown, so
    /// the token is used once and never reused.
    #[must_use]
    pub fn issued(
        access_token: impl Into<String>,
        token_type: Option<String>,
        expires_in_secs: Option<i64>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.unwrap_or_else(default_token_type),
            provider: "digikey".to_owned(),
            expires_at: expires_in_secs
                .and_then(Duration::try_seconds)
                .and_then(|lifetime| now.checked_add_signed(lifetime)),
        }
    }

    /// `true` when an expiry is known and lies more than 60 s past `now`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .is_some_and(|at| at - now > Duration::seconds(EXPIRY_SKEW_SECS))
    }
}

/// Where the DigiKey client keeps its access token between requests and runs.
pub trait TokenStore: Send + Sync + Debug {
    /// Returns the stored token, or `None` if nothing usable is stored.
    fn load(&self) -> Option<StoredToken>;

    /// Persists `token`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`DistributorError::TokenStore`] if the token cannot be written.
    fn save(&self, token: &StoredToken) -> Result<(), DistributorError>;
}

/// Process-local store. Tokens do not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<StoredToken>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<StoredToken> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, token: &StoredToken) -> Result<(), DistributorError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }
}

/// JSON file store. A missing or unreadable file loads as `None`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<StoredToken> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring unreadable token cache"
                );
                None
            }
        }
    }

    fn save(&self, token: &StoredToken) -> Result<(), DistributorError> {
        let json = serde_json::to_string_pretty(token)
            .map_err(|e| DistributorError::TokenStore(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| {
            DistributorError::TokenStore(format!("{}: {e}", self.path.display()))
        })
    }
}
