//! Keyring-based session storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::entities::User;
use crate::domain::errors::AuthError;
use crate::domain::ports::SessionStoragePort;

const KEYRING_SERVICE: &str = "kapee";
const KEYRING_USER: &str = "session";

/// Keeps the signed-in user as a JSON blob in the system keyring.
pub struct KeyringSessionStorage {
    service: String,
    user: String,
}

impl KeyringSessionStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::with_names(KEYRING_SERVICE, KEYRING_USER)
    }

    /// Creates storage with custom names.
    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    fn entry(&self) -> Result<Entry, AuthError> {
        Entry::new(&self.service, &self.user)
            .map_err(|e| AuthError::retrieval_failed(format!("failed to access keyring: {e}")))
    }
}

impl Default for KeyringSessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStoragePort for KeyringSessionStorage {
    async fn load_session(&self) -> Result<Option<User>, AuthError> {
        debug!(service = %self.service, "Loading session from keyring");

        let entry = self.entry()?;

        let blob = match entry.get_password() {
            Ok(blob) => Zeroizing::new(blob),
            Err(keyring::Error::NoEntry) => {
                debug!("No session stored in keyring");
                return Ok(None);
            }
            Err(e) => {
                warn!(error = %e, "Failed to read session from keyring");
                return Err(AuthError::retrieval_failed(e.to_string()));
            }
        };

        match serde_json::from_str::<User>(&blob) {
            Ok(user) => {
                debug!(user_id = %user.id(), "Session found in keyring");
                Ok(Some(user))
            }
            Err(e) => {
                warn!(error = %e, "Stored session is unreadable, ignoring it");
                Ok(None)
            }
        }
    }

    async fn store_session(&self, user: &User) -> Result<(), AuthError> {
        debug!(service = %self.service, user_id = %user.id(), "Storing session in keyring");

        let blob = serde_json::to_string(user)
            .map(Zeroizing::new)
            .map_err(|e| AuthError::storage_failed(format!("failed to encode session: {e}")))?;

        self.entry()?.set_password(&blob).map_err(|e| {
            warn!(error = %e, "Failed to store session in keyring");
            AuthError::storage_failed(e.to_string())
        })
    }

    async fn delete_session(&self) -> Result<(), AuthError> {
        debug!(service = %self.service, "Deleting session from keyring");

        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Failed to delete session from keyring");
                Err(AuthError::storage_failed(e.to_string()))
            }
        }
    }
}
