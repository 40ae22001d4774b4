//! Admin route guard.

use super::entities::User;
use super::navigation::Route;

/// Outcome of checking a session against the admin area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Authenticated admin; render the protected content.
    Allow,
    /// No session while already on the login screen.
    Pending,
    /// No session; send the user to the login screen.
    RedirectToLogin,
    /// Signed in without the admin role.
    NotAuthorized {
        /// Only set when the current route is inside the admin area, so a
        /// redirect cannot loop back into the guard.
        redirect_home: bool,
    },
}

impl GuardDecision {
    #[must_use]
    pub const fn allows_render(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Placeholder text shown instead of the protected content.
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::Pending | Self::RedirectToLogin => Some("Checking authentication..."),
            Self::NotAuthorized { .. } => Some("Not authorized"),
        }
    }

    /// Route to navigate to, if any.
    #[must_use]
    pub fn redirect(self) -> Option<Route> {
        match self {
            Self::RedirectToLogin => Some(Route::Login),
            Self::NotAuthorized {
                redirect_home: true,
            } => Some(Route::Home),
            _ => None,
        }
    }
}

/// Gatekeeper for the admin console.
pub struct AdminGuard;

impl AdminGuard {
    #[must_use]
    pub fn check(user: Option<&User>, current: &Route) -> GuardDecision {
        match user {
            None if *current == Route::Login => GuardDecision::Pending,
            None => GuardDecision::RedirectToLogin,
            Some(user) if user.is_admin() => GuardDecision::Allow,
            Some(_) => GuardDecision::NotAuthorized {
                redirect_home: current.is_admin(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AuthToken, UserRole};
    use crate::domain::navigation::AdminRoute;

    fn user(role: UserRole) -> User {
        User::new(
            "u1",
            "jane",
            "jane@example.com",
            AuthToken::new_unchecked("tok"),
            role,
        )
    }

    #[test]
    fn test_no_session_redirects_to_login() {
        let decision = AdminGuard::check(None, &Route::Admin(AdminRoute::Products));
        assert_eq!(decision, GuardDecision::RedirectToLogin);
        assert_eq!(decision.redirect(), Some(Route::Login));
        assert!(!decision.allows_render());
    }

    #[test]
    fn test_no_session_on_login_route_waits() {
        let decision = AdminGuard::check(None, &Route::Login);
        assert_eq!(decision, GuardDecision::Pending);
        assert_eq!(decision.redirect(), None);
        assert_eq!(decision.message(), Some("Checking authentication..."));
    }

    #[test]
    fn test_regular_user_is_not_authorized() {
        let regular = user(UserRole::User);

        let inside = AdminGuard::check(Some(&regular), &Route::Admin(AdminRoute::Orders));
        assert_eq!(inside, GuardDecision::NotAuthorized { redirect_home: true });
        assert_eq!(inside.redirect(), Some(Route::Home));
        assert_eq!(inside.message(), Some("Not authorized"));

        let outside = AdminGuard::check(Some(&regular), &Route::Profile);
        assert_eq!(outside.redirect(), None);
        assert!(!outside.allows_render());
    }

    #[test]
    fn test_admin_is_allowed() {
        let admin = user(UserRole::Admin);
        let decision = AdminGuard::check(Some(&admin), &Route::Admin(AdminRoute::Dashboard));
        assert!(decision.allows_render());
        assert_eq!(decision.message(), None);
    }

    #[test]
    fn test_denies_every_admin_route_without_admin_session() {
        let regular = user(UserRole::User);
        for section in AdminRoute::ALL {
            let route = Route::Admin(section);
            assert!(!AdminGuard::check(None, &route).allows_render());
            assert!(!AdminGuard::check(Some(&regular), &route).allows_render());
        }
    }
}
