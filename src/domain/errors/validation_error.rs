//! Form validation errors.

use thiserror::Error;

use crate::domain::validation::FieldErrors;

/// Rejected form submission: a banner message plus per-field errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{banner}")]
pub struct ValidationError {
    banner: String,
    fields: FieldErrors,
}

impl ValidationError {
    #[must_use]
    pub fn new(banner: impl Into<String>, fields: FieldErrors) -> Self {
        Self {
            banner: banner.into(),
            fields,
        }
    }

    /// Error with a banner only, no highlighted field.
    #[must_use]
    pub fn banner_only(banner: impl Into<String>) -> Self {
        Self::new(banner, FieldErrors::default())
    }

    #[must_use]
    pub fn banner(&self) -> &str {
        &self.banner
    }

    #[must_use]
    pub const fn fields(&self) -> &FieldErrors {
        &self.fields
    }
}
