//! Authentication port definition.

use async_trait::async_trait;

use crate::domain::entities::User;
use crate::domain::errors::{ApiError, AuthError};

/// Email and password for `POST /api/users/login`.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

/// New account data. The role is always `user`.
#[derive(Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// OTP confirmation for a forgotten password.
#[derive(Clone)]
pub struct PasswordReset {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

impl std::fmt::Debug for PasswordReset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordReset")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Port for account operations against the shop API.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Exchanges credentials for a user with a bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError>;

    /// Creates a regular user account.
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;

    /// Asks the server to email a one-time password.
    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError>;

    /// Sets a new password using the emailed OTP.
    async fn reset_password(&self, reset: &PasswordReset) -> Result<(), ApiError>;
}
