//! Errors returned by the shop API boundary.

use thiserror::Error;

/// API error variants.
///
/// There is no taxonomy beyond "network or server failure with an optional
/// server message"; the extra variants only separate causes for logging.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("not authorized{}", suffix(.message.as_deref()))]
    Unauthorized { message: Option<String> },

    #[error("server responded with HTTP {status}{}", suffix(.message.as_deref()))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("unexpected response: {message}")]
    Decode { message: String },

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

fn suffix(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

impl ApiError {
    /// Builds the error for a non-success HTTP status.
    #[must_use]
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.trim().is_empty());
        if status == 401 {
            Self::Unauthorized { message }
        } else {
            Self::Server { status, message }
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// The `message` field of the server's error body, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text for the status banner: the server message, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
