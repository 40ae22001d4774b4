//! Bearer access token value object.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Opaque bearer token issued by the shop API.
///
/// The value is never verified locally; it is only checked for being usable
/// inside an `Authorization` header. Debug and Display output is masked and
/// the memory is wiped on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct AuthToken {
    value: String,
}

impl AuthToken {
    /// Creates new token, rejecting empty values and embedded whitespace.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let mut raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            raw.zeroize();
            return None;
        }

        let token = Self {
            value: trimmed.to_string(),
        };
        raw.zeroize();
        Some(token)
    }

    /// Creates token without validation.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.value)
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let len = self.value.chars().count();
        if len <= 10 {
            return "*".repeat(len);
        }

        let prefix: String = self.value.chars().take(4).collect();
        let suffix: String = self.value.chars().skip(len - 4).collect();
        format!("{prefix}...{suffix}")
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}
