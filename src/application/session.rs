//! Process-wide session context.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::entities::{AuthToken, User};

/// Shared handle to the single signed-in user. Clones share the same slot;
/// the last writer wins.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    user: Arc<RwLock<Option<User>>>,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<User> {
        self.user.read().clone()
    }

    pub fn set(&self, user: User) {
        *self.user.write() = Some(user);
    }

    pub fn clear(&self) {
        *self.user.write() = None;
    }

    /// Bearer token of the current session.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.user.read().as_ref().map(|u| u.access_token().clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.read().as_ref().is_some_and(User::is_admin)
    }
}
