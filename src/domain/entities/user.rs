//! Authenticated shop user.

use serde::{Deserialize, Serialize};

use super::AuthToken;

/// Server-assigned user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Role attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    /// Resolves the role from the raw `userRole`/`role` fields of a login
    /// response. Anything other than exactly `admin` is a regular user.
    #[must_use]
    pub fn resolve(user_role: Option<&str>, role: Option<&str>) -> Self {
        let raw = user_role
            .filter(|r| !r.is_empty())
            .or_else(|| role.filter(|r| !r.is_empty()));

        match raw {
            Some("admin") => Self::Admin,
            _ => Self::User,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single authenticated user held by the client.
///
/// Serialized as the JSON blob kept in local storage, with the field names
/// the API uses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "_id")]
    id: UserId,
    username: String,
    email: String,
    #[serde(rename = "accessToken")]
    access_token: AuthToken,
    #[serde(rename = "userRole", default)]
    role: UserRole,
}

impl User {
    #[must_use]
    pub fn new(
        id: impl Into<UserId>,
        username: impl Into<String>,
        email: impl Into<String>,
        access_token: AuthToken,
        role: UserRole,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            access_token,
            role,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub const fn access_token(&self) -> &AuthToken {
        &self.access_token
    }

    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Name shown in headers; falls back to the email when no username was
    /// returned.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user(role: UserRole) -> User {
        User::new(
            "65f0c1",
            "jane",
            "jane@example.com",
            AuthToken::new_unchecked("tok"),
            role,
        )
    }

    #[test]
    fn test_role_prefers_user_role_field() {
        assert_eq!(UserRole::resolve(Some("admin"), Some("user")), UserRole::Admin);
        assert_eq!(UserRole::resolve(Some("user"), Some("admin")), UserRole::User);
    }

    #[test]
    fn test_role_falls_back_to_role_then_user() {
        assert_eq!(UserRole::resolve(None, Some("admin")), UserRole::Admin);
        assert_eq!(UserRole::resolve(Some(""), Some("admin")), UserRole::Admin);
        assert_eq!(UserRole::resolve(None, None), UserRole::User);
        assert_eq!(UserRole::resolve(Some("superuser"), None), UserRole::User);
    }

    #[test]
    fn test_role_match_is_case_sensitive() {
        assert_eq!(UserRole::resolve(Some("Admin"), None), UserRole::User);
        assert_eq!(UserRole::resolve(Some("ADMIN"), None), UserRole::User);
        assert_eq!(UserRole::resolve(None, Some("Admin")), UserRole::User);
    }

    #[test]
    fn test_session_blob_uses_api_field_names() {
        let user = make_user(UserRole::Admin);
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["_id"], "65f0c1");
        assert_eq!(json["accessToken"], "tok");
        assert_eq!(json["userRole"], "admin");

        let restored: User = serde_json::from_value(json).unwrap();
        assert_eq!(restored, user);
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = User::new(
            "1",
            "",
            "nobody@example.com",
            AuthToken::new_unchecked("tok"),
            UserRole::User,
        );
        assert_eq!(user.display_name(), "nobody@example.com");
        assert!(!user.is_admin());
        assert!(make_user(UserRole::Admin).is_admin());
    }
}
