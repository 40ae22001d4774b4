//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::dto::LoginResponse;
use crate::application::session::SessionContext;
use crate::domain::errors::AuthError;
use crate::domain::navigation::Route;
use crate::domain::ports::{AuthPort, Credentials, SessionStoragePort};
use crate::domain::validation::FieldErrors;

/// Banner shown when login fails without a server message.
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

/// Banner shown when required login fields are empty.
pub const FIX_FIELDS: &str = "Please fix the highlighted fields.";

/// Handles sign-in and sign-out.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn SessionStoragePort>,
    session: SessionContext,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub fn new(
        auth_port: Arc<dyn AuthPort>,
        storage_port: Arc<dyn SessionStoragePort>,
        session: SessionContext,
    ) -> Self {
        Self {
            auth_port,
            storage_port,
            session,
        }
    }

    /// Signs in and makes the returned user the current session.
    ///
    /// # Errors
    /// Returns a validation error for empty fields, or the API failure.
    pub async fn execute(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        FieldErrors::new()
            .require("email", email, "Email is required")
            .require("password", password, "Password is required")
            .into_result(FIX_FIELDS)?;

        self.login(&Credentials::new(email, password)).await
    }

    /// Signs in with already validated credentials.
    ///
    /// # Errors
    /// Returns error if the server rejects the credentials.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        debug!(email = %credentials.email, "Attempting login");

        let user = self.auth_port.login(credentials).await.map_err(|e| {
            warn!(error = %e, "Login rejected");
            e
        })?;

        info!(
            user_id = %user.id(),
            role = %user.role(),
            "Successfully authenticated"
        );

        self.session.set(user.clone());

        let session_persisted = match self.storage_port.store_session(&user).await {
            Ok(()) => {
                debug!("Session persisted to secure storage");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to persist session to secure storage");
                false
            }
        };

        Ok(LoginResponse::new(user, session_persisted))
    }

    /// Clears the session from memory and storage. Returns the screen to
    /// show next.
    pub async fn logout(&self) -> Route {
        self.session.clear();
        match self.storage_port.delete_session().await {
            Ok(()) => info!("Signed out"),
            Err(e) => error!(error = %e, "Failed to delete session from secure storage"),
        }
        Route::Home
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserRole;
    use crate::domain::ports::mocks::{MockAuthPort, MockSessionStorage};

    fn make_use_case(
        auth: MockAuthPort,
        storage: MockSessionStorage,
    ) -> (LoginUseCase, Arc<MockSessionStorage>, SessionContext) {
        let storage = Arc::new(storage);
        let session = SessionContext::new();
        let use_case = LoginUseCase::new(Arc::new(auth), storage.clone(), session.clone());
        (use_case, storage, session)
    }

    #[tokio::test]
    async fn test_successful_login_stores_session() {
        let (use_case, storage, session) =
            make_use_case(MockAuthPort::new(true), MockSessionStorage::new());

        let response = use_case
            .execute("test@example.com", "Secret123!")
            .await
            .unwrap();

        assert_eq!(response.user.username(), "testuser");
        assert_eq!(response.next, Route::Profile);
        assert!(response.session_persisted);
        assert_eq!(session.current(), Some(response.user.clone()));
        assert!(storage.has_session().await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_fields_never_reach_the_server() {
        let auth = Arc::new(MockAuthPort::new(true));
        let use_case = LoginUseCase::new(
            auth.clone(),
            Arc::new(MockSessionStorage::new()),
            SessionContext::new(),
        );

        let err = use_case.execute("", "").await.unwrap_err();

        let invalid = err.validation().unwrap();
        assert_eq!(invalid.banner(), FIX_FIELDS);
        assert_eq!(invalid.fields().get("email"), Some("Email is required"));
        assert_eq!(invalid.fields().get("password"), Some("Password is required"));
        assert!(auth.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_login_surfaces_server_message() {
        let (use_case, storage, session) =
            make_use_case(MockAuthPort::new(false), MockSessionStorage::new());

        let err = use_case.execute("a@b.c", "wrong").await.unwrap_err();

        assert_eq!(err.user_message(LOGIN_FAILED), "mock login rejected");
        assert!(session.current().is_none());
        assert!(!storage.has_session().await.unwrap());
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_fatal() {
        let (use_case, _storage, session) =
            make_use_case(MockAuthPort::new(true), MockSessionStorage::failing());

        let response = use_case.execute("a@b.c", "pw").await.unwrap();

        assert!(!response.session_persisted);
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_admin_role_is_kept() {
        let (use_case, _storage, session) = make_use_case(
            MockAuthPort::with_role(true, UserRole::Admin),
            MockSessionStorage::new(),
        );

        use_case.execute("admin@shop.io", "pw").await.unwrap();

        assert!(session.is_admin());
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_goes_home() {
        let (use_case, storage, session) =
            make_use_case(MockAuthPort::new(true), MockSessionStorage::new());
        use_case.execute("a@b.c", "pw").await.unwrap();

        let next = use_case.logout().await;

        assert_eq!(next, Route::Home);
        assert!(session.current().is_none());
        assert!(!storage.has_session().await.unwrap());
    }
}
