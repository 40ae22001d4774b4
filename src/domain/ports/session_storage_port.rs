//! Session storage port definition.

use async_trait::async_trait;

use crate::domain::entities::User;
use crate::domain::errors::AuthError;

/// Port for persisting the signed-in user between runs.
#[async_trait]
pub trait SessionStoragePort: Send + Sync {
    /// Retrieves the stored session.
    async fn load_session(&self) -> Result<Option<User>, AuthError>;

    /// Stores the session, replacing any previous one.
    async fn store_session(&self, user: &User) -> Result<(), AuthError>;

    /// Deletes the stored session.
    async fn delete_session(&self) -> Result<(), AuthError>;

    /// Checks if a session is stored.
    async fn has_session(&self) -> Result<bool, AuthError> {
        Ok(self.load_session().await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;

    /// Mock session storage for testing.
    pub struct MockSessionStorage {
        user: Arc<RwLock<Option<User>>>,
        fail_writes: AtomicBool,
    }

    impl MockSessionStorage {
        /// Creates empty mock storage.
        pub fn new() -> Self {
            Self {
                user: Arc::new(RwLock::new(None)),
                fail_writes: AtomicBool::new(false),
            }
        }

        /// Creates mock storage holding a session.
        pub fn with_user(user: User) -> Self {
            Self {
                user: Arc::new(RwLock::new(Some(user))),
                fail_writes: AtomicBool::new(false),
            }
        }

        /// Makes every store and delete fail.
        pub fn failing() -> Self {
            let storage = Self::new();
            storage.fail_writes.store(true, Ordering::SeqCst);
            storage
        }

        fn check_writable(&self) -> Result<(), AuthError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                Err(AuthError::storage_failed("mock storage is read-only"))
            } else {
                Ok(())
            }
        }
    }

    impl Default for MockSessionStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SessionStoragePort for MockSessionStorage {
        async fn load_session(&self) -> Result<Option<User>, AuthError> {
            Ok(self.user.read().await.clone())
        }

        async fn store_session(&self, user: &User) -> Result<(), AuthError> {
            self.check_writable()?;
            *self.user.write().await = Some(user.clone());
            Ok(())
        }

        async fn delete_session(&self) -> Result<(), AuthError> {
            self.check_writable()?;
            *self.user.write().await = None;
            Ok(())
        }
    }
}
