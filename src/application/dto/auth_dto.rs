//! Authentication DTOs.

use crate::domain::entities::User;
use crate::domain::navigation::Route;

/// Login response data.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    /// Authenticated user.
    pub user: User,
    /// Whether the session blob reached local storage.
    pub session_persisted: bool,
    /// Screen to show next.
    pub next: Route,
}

impl LoginResponse {
    /// Creates new login response landing on the profile screen.
    #[must_use]
    pub const fn new(user: User, session_persisted: bool) -> Self {
        Self {
            user,
            session_persisted,
            next: Route::Profile,
        }
    }
}

/// Outcome of a password-reset step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetStep {
    /// Success banner text.
    pub message: &'static str,
    /// Screen to show next, if the step moves the flow forward.
    pub next: Option<Route>,
}
