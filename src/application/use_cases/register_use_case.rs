//! Registration use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::login_use_case::{FIX_FIELDS, LoginUseCase};
use crate::application::dto::LoginResponse;
use crate::application::error::ActionError;
use crate::domain::ports::{AuthPort, Registration};
use crate::domain::validation::{FieldErrors, ensure_not_weak};

/// Banner shown when registration fails without a server message.
pub const REGISTRATION_FAILED: &str = "Registration failed.";

/// Creates an account, then signs in with it.
#[derive(Clone)]
pub struct RegisterUseCase {
    auth_port: Arc<dyn AuthPort>,
    login: LoginUseCase,
}

impl RegisterUseCase {
    #[must_use]
    pub fn new(auth_port: Arc<dyn AuthPort>, login: LoginUseCase) -> Self {
        Self { auth_port, login }
    }

    /// # Errors
    /// Returns a validation error for empty fields or a weak password, else
    /// the server message of the failed registration or login.
    pub async fn execute(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ActionError> {
        FieldErrors::new()
            .require("username", username, "Username is required")
            .require("email", email, "Email is required")
            .require("password", password, "Password is required")
            .into_result(FIX_FIELDS)?;
        ensure_not_weak(password)?;

        let registration = Registration::new(username, email, password);
        debug!(email = %registration.email, "Registering account");

        self.auth_port.register(&registration).await.map_err(|e| {
            warn!(error = %e, "Registration rejected");
            ActionError::from_api(&e, REGISTRATION_FAILED)
        })?;
        info!(email = %registration.email, "Account created, signing in");

        self.login
            .login(&registration.credentials())
            .await
            .map_err(|e| ActionError::from_auth(e, REGISTRATION_FAILED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::SessionContext;
    use crate::domain::navigation::Route;
    use crate::domain::ports::mocks::{MockAuthPort, MockSessionStorage};
    use crate::domain::validation::WEAK_PASSWORD_MESSAGE;

    fn make_use_case(auth: Arc<MockAuthPort>) -> (RegisterUseCase, SessionContext) {
        let session = SessionContext::new();
        let login = LoginUseCase::new(
            auth.clone(),
            Arc::new(MockSessionStorage::new()),
            session.clone(),
        );
        (RegisterUseCase::new(auth, login), session)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = Arc::new(MockAuthPort::new(true));
        let (use_case, session) = make_use_case(auth.clone());

        let response = use_case
            .execute("jane", "jane@example.com", "Abc12345!")
            .await
            .unwrap();

        assert_eq!(auth.calls(), vec!["register", "login"]);
        assert_eq!(response.next, Route::Profile);
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let auth = Arc::new(MockAuthPort::new(true));
        let (use_case, _) = make_use_case(auth.clone());

        let err = use_case.execute("", "jane@example.com", "").await.unwrap_err();

        let invalid = err.validation().unwrap();
        assert_eq!(invalid.banner(), FIX_FIELDS);
        assert_eq!(invalid.fields().len(), 2);
        assert_eq!(invalid.fields().get("username"), Some("Username is required"));
        assert!(auth.calls().is_empty());
    }

    #[tokio::test]
    async fn test_weak_password_is_rejected_locally() {
        let auth = Arc::new(MockAuthPort::new(true));
        let (use_case, _) = make_use_case(auth.clone());

        let err = use_case.execute("jane", "jane@example.com", "abc").await.unwrap_err();

        assert_eq!(err.message(), WEAK_PASSWORD_MESSAGE);
        assert!(auth.calls().is_empty());
    }

    #[tokio::test]
    async fn test_server_rejection() {
        let auth = Arc::new(MockAuthPort::new(false));
        let (use_case, session) = make_use_case(auth.clone());

        let err = use_case
            .execute("jane", "jane@example.com", "Abc12345!")
            .await
            .unwrap_err();

        assert_eq!(err.message(), "mock register rejected");
        assert_eq!(auth.calls(), vec!["register"]);
        assert!(!session.is_authenticated());
    }
}
