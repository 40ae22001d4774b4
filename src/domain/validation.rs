//! Form presence checks and password strength.

use std::collections::BTreeMap;

use crate::domain::errors::ValidationError;

/// Banner shown when a weak password is submitted.
pub const WEAK_PASSWORD_MESSAGE: &str =
    "Password too weak. Use at least 8 chars incl. upper, lower, number, and symbol.";

/// Password strength classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    const MIN_LENGTH: usize = 8;

    /// Classifies a password. One point each for length >= 8, an uppercase
    /// letter, a lowercase letter, a digit and a symbol; 4+ is strong, 3 is
    /// medium.
    #[must_use]
    pub fn classify(password: &str) -> Self {
        let checks = [
            password.chars().count() >= Self::MIN_LENGTH,
            password.chars().any(|c| c.is_ascii_uppercase()),
            password.chars().any(|c| c.is_ascii_lowercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
        ];
        let score = checks.iter().filter(|passed| **passed).count();

        match score {
            4.. => Self::Strong,
            3 => Self::Medium,
            _ => Self::Weak,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }

    #[must_use]
    pub const fn is_weak(self) -> bool {
        matches!(self, Self::Weak)
    }
}

impl std::fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejects passwords classified as weak.
///
/// # Errors
/// Returns a banner-only validation error for weak passwords.
pub fn ensure_not_weak(password: &str) -> Result<(), ValidationError> {
    if PasswordStrength::classify(password).is_weak() {
        Err(ValidationError::banner_only(WEAK_PASSWORD_MESSAGE))
    } else {
        Ok(())
    }
}

/// Per-field error messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` when `value` is empty.
    #[must_use]
    pub fn require(mut self, field: &'static str, value: &str, message: &str) -> Self {
        if value.is_empty() {
            self.errors.insert(field, message.to_string());
        }
        self
    }

    /// Records `message` for `field` unconditionally.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Clears the error of an edited field.
    pub fn clear(&mut self, field: &str) {
        self.errors.remove(field);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Fails with `banner` when any field was rejected.
    ///
    /// # Errors
    /// Returns the collected field errors wrapped in a validation error.
    pub fn into_result(self, banner: &str) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(banner, self))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("abc" => PasswordStrength::Weak ; "lowercase only")]
    #[test_case("" => PasswordStrength::Weak ; "empty")]
    #[test_case("abcdefgh" => PasswordStrength::Weak ; "long lowercase")]
    #[test_case("abcdefg1" => PasswordStrength::Medium ; "long lower digit")]
    #[test_case("Abc1" => PasswordStrength::Medium ; "short mixed")]
    #[test_case("Abcdefg1" => PasswordStrength::Strong ; "four classes")]
    #[test_case("Abc12345!" => PasswordStrength::Strong ; "all classes")]
    #[test_case("Ab1!" => PasswordStrength::Strong ; "short but varied")]
    fn test_classify(password: &str) -> PasswordStrength {
        PasswordStrength::classify(password)
    }

    #[test]
    fn test_classify_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(PasswordStrength::classify("Abc12345!"), PasswordStrength::Strong);
        }
    }

    #[test]
    fn test_non_ascii_counts_as_symbol() {
        assert_eq!(PasswordStrength::classify("pässwörd"), PasswordStrength::Medium);
    }

    #[test]
    fn test_ensure_not_weak() {
        assert!(ensure_not_weak("Abc12345!").is_ok());
        let err = ensure_not_weak("abc").unwrap_err();
        assert_eq!(err.banner(), WEAK_PASSWORD_MESSAGE);
        assert!(err.fields().is_empty());
    }

    #[test]
    fn test_required_fields_rejects_empty_values() {
        let result = FieldErrors::new()
            .require("email", "", "Email is required")
            .require("password", "secret", "Password is required")
            .into_result("Please fix the highlighted fields.");

        let err = result.unwrap_err();
        assert_eq!(err.banner(), "Please fix the highlighted fields.");
        assert_eq!(err.fields().len(), 1);
        assert_eq!(err.fields().get("email"), Some("Email is required"));
        assert_eq!(err.fields().get("password"), None);
    }

    #[test]
    fn test_clear_removes_field_error() {
        let mut errors = FieldErrors::new().require("otp", "", "OTP is required");
        errors.clear("otp");
        assert!(errors.is_empty());
        assert!(errors.into_result("Please fill all fields.").is_ok());
    }
}
