//! Authentication error types.

use thiserror::Error;

use super::{ApiError, ValidationError};

/// Authentication error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("authentication request failed: {0}")]
    Api(#[from] ApiError),

    #[error("login response is missing session data: {reason}")]
    InvalidSession { reason: String },

    #[error("failed to retrieve stored session: {message}")]
    RetrievalFailed { message: String },

    #[error("failed to store session: {message}")]
    StorageFailed { message: String },

    #[error("no authenticated session")]
    NotAuthenticated,
}

impl AuthError {
    /// Creates invalid session error.
    #[must_use]
    pub fn invalid_session(reason: impl Into<String>) -> Self {
        Self::InvalidSession {
            reason: reason.into(),
        }
    }

    /// Creates retrieval failed error.
    #[must_use]
    pub fn retrieval_failed(message: impl Into<String>) -> Self {
        Self::RetrievalFailed {
            message: message.into(),
        }
    }

    /// Creates storage failed error.
    #[must_use]
    pub fn storage_failed(message: impl Into<String>) -> Self {
        Self::StorageFailed {
            message: message.into(),
        }
    }

    /// Text for the status banner. Validation errors carry their own banner,
    /// API errors the server message; everything else uses `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(err) => err.banner().to_string(),
            Self::Api(err) => err.user_message(fallback),
            _ => fallback.to_string(),
        }
    }

    /// Field errors to highlight, if this was a validation failure.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_sources() {
        let validation = AuthError::from(ValidationError::banner_only("Please fill all fields."));
        assert_eq!(validation.user_message("Login failed."), "Please fill all fields.");

        let api = AuthError::from(ApiError::from_status(400, Some("Invalid credentials".into())));
        assert_eq!(api.user_message("Login failed."), "Invalid credentials");

        let storage = AuthError::storage_failed("keyring locked");
        assert_eq!(storage.user_message("Login failed."), "Login failed.");
    }
}
