//! Session restoration use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::session::SessionContext;
use crate::domain::entities::User;
use crate::domain::ports::SessionStoragePort;

/// Loads a previously stored session into the context at startup.
///
/// The stored token is trusted as-is; nothing checks expiry.
pub struct RestoreSessionUseCase {
    storage_port: Arc<dyn SessionStoragePort>,
    session: SessionContext,
}

impl RestoreSessionUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(storage_port: Arc<dyn SessionStoragePort>, session: SessionContext) -> Self {
        Self {
            storage_port,
            session,
        }
    }

    /// Restores the stored session when `enabled`. Unreadable storage is
    /// treated as "no session".
    pub async fn execute(&self, enabled: bool) -> Option<User> {
        if !enabled {
            debug!("Session restoration disabled");
            return None;
        }

        match self.storage_port.load_session().await {
            Ok(Some(user)) => {
                info!(user_id = %user.id(), "Restored stored session");
                self.session.set(user.clone());
                Some(user)
            }
            Ok(None) => {
                debug!("No stored session");
                None
            }
            Err(e) => {
                warn!(error = %e, "Stored session unreadable, starting signed out");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AuthToken, UserRole};
    use crate::domain::ports::mocks::MockSessionStorage;

    fn stored_user() -> User {
        User::new(
            "u1",
            "jane",
            "jane@example.com",
            AuthToken::new_unchecked("stored"),
            UserRole::User,
        )
    }

    #[tokio::test]
    async fn test_disabled_leaves_session_empty() {
        let session = SessionContext::new();
        let use_case = RestoreSessionUseCase::new(
            Arc::new(MockSessionStorage::with_user(stored_user())),
            session.clone(),
        );

        assert!(use_case.execute(false).await.is_none());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_enabled_restores_stored_user() {
        let session = SessionContext::new();
        let use_case = RestoreSessionUseCase::new(
            Arc::new(MockSessionStorage::with_user(stored_user())),
            session.clone(),
        );

        let restored = use_case.execute(true).await;

        assert_eq!(restored, Some(stored_user()));
        assert_eq!(session.token().map(|t| t.as_str().to_string()), Some("stored".into()));
    }

    #[tokio::test]
    async fn test_enabled_with_empty_storage() {
        let session = SessionContext::new();
        let use_case =
            RestoreSessionUseCase::new(Arc::new(MockSessionStorage::new()), session.clone());

        assert!(use_case.execute(true).await.is_none());
        assert!(!session.is_authenticated());
    }
}
