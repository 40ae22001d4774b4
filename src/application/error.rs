//! Failures of user-triggered actions.

use thiserror::Error;

use crate::domain::errors::{ApiError, AuthError, ValidationError};

/// Why an action did not complete, phrased for the status banner.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    /// Form input was rejected before any request was made.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The action needs a session; the caller should open the login screen.
    #[error("{0}")]
    LoginRequired(String),

    /// The request failed.
    #[error("{0}")]
    Failed(String),
}

impl ActionError {
    /// Maps an API failure to the server's message, else `fallback`.
    #[must_use]
    pub fn from_api(err: &ApiError, fallback: &str) -> Self {
        Self::Failed(err.user_message(fallback))
    }

    /// Maps an authentication failure, keeping validation details.
    #[must_use]
    pub fn from_auth(err: AuthError, fallback: &str) -> Self {
        match err {
            AuthError::Validation(invalid) => Self::Invalid(invalid),
            AuthError::NotAuthenticated => Self::LoginRequired(fallback.to_string()),
            other => Self::Failed(other.user_message(fallback)),
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Text for the status banner.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Invalid(err) => err.banner(),
            Self::LoginRequired(message) | Self::Failed(message) => message,
        }
    }

    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::LoginRequired(_))
    }

    /// Field errors to highlight, if any.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}
