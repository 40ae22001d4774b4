use serde::{Deserialize, Serialize};

use crate::domain::entities::{AuthToken, Cart, Category, Order, Product, User, UserRole};
use crate::domain::errors::AuthError;

/// `message` field of an error body.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterBody<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(rename = "userRole")]
    pub user_role: &'static str,
}

#[derive(Debug, Serialize)]
pub struct EmailBody<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordBody<'a> {
    pub email: &'a str,
    pub otp: &'a str,
    #[serde(rename = "newPassword")]
    pub new_password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CartLineBody<'a> {
    #[serde(rename = "productId")]
    pub product_id: &'a str,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct StatusBody<'a> {
    pub status: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CategoryBody<'a> {
    pub name: &'a str,
}

/// Empty JSON object body.
#[derive(Debug, Serialize)]
pub struct EmptyBody {}

/// User object of a login response.
#[derive(Debug, Deserialize)]
pub struct LoginUser {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "accessToken", default)]
    pub access_token: Option<String>,
    #[serde(rename = "userRole", default)]
    pub user_role: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl TryFrom<LoginUser> for User {
    type Error = AuthError;

    fn try_from(raw: LoginUser) -> Result<Self, Self::Error> {
        let token = raw
            .access_token
            .and_then(AuthToken::new)
            .ok_or_else(|| AuthError::invalid_session("missing access token"))?;
        let role = UserRole::resolve(raw.user_role.as_deref(), raw.role.as_deref());
        Ok(Self::new(raw.id, raw.username, raw.email, token, role))
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginEnvelope {
    pub user: LoginUser,
}

#[derive(Debug, Deserialize)]
pub struct ProductsEnvelope {
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub struct ProductEnvelope {
    pub product: Product,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesEnvelope {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// `{cart: {items}}`; a user without a cart gets `cart: null`.
#[derive(Debug, Deserialize)]
pub struct CartEnvelope {
    #[serde(default)]
    pub cart: Option<Cart>,
}

impl CartEnvelope {
    pub fn into_cart(self) -> Cart {
        self.cart.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct SuccessEnvelope {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct OrdersEnvelope {
    #[serde(default)]
    pub orders: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_user_role_fallbacks() {
        let json = r#"{"user": {"_id": "u1", "username": "jane", "email": "j@x.io",
            "accessToken": "abc.def", "role": "admin"}}"#;
        let envelope: LoginEnvelope = serde_json::from_str(json).unwrap();
        let user = User::try_from(envelope.user).unwrap();

        assert!(user.is_admin());
        assert_eq!(user.access_token().as_str(), "abc.def");
    }

    #[test]
    fn test_login_without_token_is_rejected() {
        let json = r#"{"_id": "u1", "username": "jane", "email": "j@x.io"}"#;
        let raw: LoginUser = serde_json::from_str(json).unwrap();
        assert!(matches!(
            User::try_from(raw),
            Err(AuthError::InvalidSession { .. })
        ));
    }

    #[test]
    fn test_missing_cart_is_empty() {
        let envelope: CartEnvelope = serde_json::from_str(r#"{"cart": null}"#).unwrap();
        assert!(envelope.into_cart().is_empty());

        let envelope: CartEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.into_cart().is_empty());
    }

    #[test]
    fn test_register_body_carries_user_role() {
        let body = RegisterBody {
            username: "jane",
            email: "j@x.io",
            password: "pw",
            user_role: "user",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["userRole"], "user");
    }

    #[test]
    fn test_empty_body_serializes_to_object() {
        assert_eq!(serde_json::to_string(&EmptyBody {}).unwrap(), "{}");
    }
}
