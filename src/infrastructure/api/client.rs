//! Shop REST API client.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{
    CartEnvelope, CartLineBody, CategoriesEnvelope, CategoryBody, EmailBody, EmptyBody,
    ErrorBody, LoginBody, LoginEnvelope, OrdersEnvelope, ProductEnvelope, ProductsEnvelope,
    RegisterBody, ResetPasswordBody, StatusBody, SuccessEnvelope,
};
use super::endpoints::Endpoints;
use crate::domain::entities::{
    AuthToken, Cart, Category, Order, OrderStatus, Product, ProductId, User,
};
use crate::domain::errors::{ApiError, AuthError};
use crate::domain::ports::{
    AdminPort, AuthPort, Credentials, PasswordReset, ProductForm, Registration, StorefrontPort,
};

const USER_AGENT: &str = concat!("kapee/", env!("CARGO_PKG_VERSION"));

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP adapter for every shop port.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoints: Endpoints,
}

impl ApiClient {
    /// Creates client for `base_url`.
    ///
    /// # Errors
    /// Returns error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let endpoints = Endpoints::new(base_url)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::invalid_request(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, endpoints })
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    #[must_use]
    pub const fn http(&self) -> &Client {
        &self.client
    }

    fn authorized(request: RequestBuilder, token: &AuthToken) -> RequestBuilder {
        request.header(header::AUTHORIZATION, token.bearer())
    }

    /// Sends the request and decodes a JSON success body.
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to decode API response");
            ApiError::decode(e.to_string())
        })
    }

    /// Sends the request and returns the raw body of a success response.
    async fn execute(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status.is_success() {
            Ok(body)
        } else {
            debug!(status = status.as_u16(), "API request failed");
            Err(error_from_body(status, &body))
        }
    }

    async fn product_form(form: &ProductForm) -> Result<Form, ApiError> {
        let mut multipart = Form::new()
            .text("prodName", form.name.clone())
            .text("prodPrice", form.price.to_string())
            .text("prodQty", form.quantity.to_string());

        if let Some(description) = &form.description {
            multipart = multipart.text("prodDesc", description.clone());
        }

        if let Some(path) = &form.image {
            let bytes = tokio::fs::read(path).await.map_err(|e| {
                ApiError::invalid_request(format!("cannot read image {}: {e}", path.display()))
            })?;
            let part = Part::bytes(bytes)
                .file_name(image_file_name(path))
                .mime_str(image_mime(path))
                .map_err(|e| ApiError::invalid_request(e.to_string()))?;
            multipart = multipart.part("image", part);
        }

        Ok(multipart)
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    warn!(error = %e, "Failed to reach shop API");
    if e.is_timeout() {
        ApiError::network("request timed out")
    } else if e.is_connect() {
        ApiError::network("failed to connect to the shop API")
    } else {
        ApiError::network(e.to_string())
    }
}

/// Builds the error for a failed response from its status and body.
#[must_use]
pub fn error_from_body(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .unwrap_or_default()
        .message;
    ApiError::from_status(status.as_u16(), message)
}

fn image_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or_else(|| "image.jpg".to_string(), str::to_string)
}

/// MIME type from the file extension; JPEG when unknown.
#[must_use]
pub fn image_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}

#[async_trait]
impl AuthPort for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        debug!("Logging in against shop API");
        let envelope: LoginEnvelope = self
            .fetch(self.client.post(self.endpoints.login()).json(&LoginBody {
                email: &credentials.email,
                password: &credentials.password,
            }))
            .await?;
        User::try_from(envelope.user)
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.execute(self.client.post(self.endpoints.register()).json(&RegisterBody {
            username: &registration.username,
            email: &registration.email,
            password: &registration.password,
            user_role: "user",
        }))
        .await
        .map(drop)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        self.execute(
            self.client
                .post(self.endpoints.request_reset())
                .json(&EmailBody { email }),
        )
        .await
        .map(drop)
    }

    async fn reset_password(&self, reset: &PasswordReset) -> Result<(), ApiError> {
        self.execute(
            self.client
                .post(self.endpoints.reset_password())
                .json(&ResetPasswordBody {
                    email: &reset.email,
                    otp: &reset.otp,
                    new_password: &reset.new_password,
                }),
        )
        .await
        .map(drop)
    }
}

#[async_trait]
impl StorefrontPort for ApiClient {
    async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let envelope: ProductsEnvelope = self.fetch(self.client.get(self.endpoints.products())).await?;
        debug!(count = envelope.products.len(), "Fetched products");
        Ok(envelope.products)
    }

    async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let envelope: ProductEnvelope = self
            .fetch(self.client.get(self.endpoints.product(id)))
            .await?;
        Ok(envelope.product)
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let envelope: ProductsEnvelope = self
            .fetch(self.client.get(self.endpoints.search(query)))
            .await?;
        Ok(envelope.products)
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let envelope: CategoriesEnvelope = self
            .fetch(self.client.get(self.endpoints.categories()))
            .await?;
        Ok(envelope.categories)
    }

    async fn cart(&self, token: &AuthToken) -> Result<Cart, ApiError> {
        let request = Self::authorized(self.client.get(self.endpoints.my_cart()), token);
        let envelope: CartEnvelope = self.fetch(request).await?;
        Ok(envelope.into_cart())
    }

    async fn add_to_cart(
        &self,
        token: &AuthToken,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<bool, ApiError> {
        let request = Self::authorized(self.client.post(self.endpoints.add_to_cart()), token)
            .json(&CartLineBody {
                product_id: product_id.as_str(),
                quantity,
            });
        let envelope: SuccessEnvelope = self.fetch(request).await?;
        Ok(envelope.success)
    }

    async fn update_cart_item(
        &self,
        token: &AuthToken,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        let request = Self::authorized(self.client.put(self.endpoints.update_cart()), token)
            .json(&CartLineBody {
                product_id: product_id.as_str(),
                quantity,
            });
        let envelope: CartEnvelope = self.fetch(request).await?;
        Ok(envelope.into_cart())
    }

    async fn remove_cart_item(
        &self,
        token: &AuthToken,
        product_id: &ProductId,
    ) -> Result<Cart, ApiError> {
        let request = Self::authorized(
            self.client.delete(self.endpoints.remove_from_cart(product_id)),
            token,
        );
        let envelope: CartEnvelope = self.fetch(request).await?;
        Ok(envelope.into_cart())
    }

    async fn create_order(&self, token: &AuthToken) -> Result<(), ApiError> {
        let request = Self::authorized(self.client.post(self.endpoints.create_order()), token)
            .json(&EmptyBody {});
        self.execute(request).await.map(drop)
    }

    async fn my_orders(&self, token: &AuthToken) -> Result<Vec<Order>, ApiError> {
        let request = Self::authorized(self.client.get(self.endpoints.my_orders()), token);
        let envelope: OrdersEnvelope = self.fetch(request).await?;
        Ok(envelope.orders)
    }
}

#[async_trait]
impl AdminPort for ApiClient {
    async fn create_product(&self, token: &AuthToken, form: &ProductForm) -> Result<(), ApiError> {
        let multipart = Self::product_form(form).await?;
        let request = Self::authorized(self.client.post(self.endpoints.create_product()), token)
            .multipart(multipart);
        self.execute(request).await.map(drop)
    }

    async fn update_product(
        &self,
        token: &AuthToken,
        id: &ProductId,
        form: &ProductForm,
    ) -> Result<(), ApiError> {
        let multipart = Self::product_form(form).await?;
        let request = Self::authorized(self.client.put(self.endpoints.update_product(id)), token)
            .multipart(multipart);
        self.execute(request).await.map(drop)
    }

    async fn delete_product(&self, token: &AuthToken, id: &ProductId) -> Result<(), ApiError> {
        let request = Self::authorized(self.client.delete(self.endpoints.delete_product(id)), token);
        self.execute(request).await.map(drop)
    }

    async fn create_category(&self, token: &AuthToken, name: &str) -> Result<(), ApiError> {
        let request = Self::authorized(self.client.post(self.endpoints.categories()), token)
            .json(&CategoryBody { name });
        self.execute(request).await.map(drop)
    }

    async fn orders(&self, token: &AuthToken) -> Result<Vec<Order>, ApiError> {
        let request = Self::authorized(self.client.get(self.endpoints.orders()), token);
        let envelope: OrdersEnvelope = self.fetch(request).await?;
        Ok(envelope.orders)
    }

    async fn update_order_status(
        &self,
        token: &AuthToken,
        order_id: &str,
        status: &OrderStatus,
    ) -> Result<(), ApiError> {
        let request = Self::authorized(self.client.put(self.endpoints.order_status(order_id)), token)
            .json(&StatusBody {
                status: status.as_str(),
            });
        self.execute(request).await.map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::path::PathBuf;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new("http://localhost:5000", DEFAULT_TIMEOUT);
        assert!(client.is_ok());
        assert!(ApiClient::new("::nope::", DEFAULT_TIMEOUT).is_err());
    }

    #[test]
    fn test_error_from_body_reads_message() {
        let err = error_from_body(StatusCode::BAD_REQUEST, r#"{"message": "Invalid credentials"}"#);
        assert_eq!(err.server_message(), Some("Invalid credentials"));

        let err = error_from_body(StatusCode::UNAUTHORIZED, "<html>nope</html>");
        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), None);

        let err = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error": "x"}"#);
        assert_eq!(err, ApiError::from_status(500, None));
    }

    #[test]
    fn test_image_part_metadata() {
        let png = PathBuf::from("/tmp/shots/Hat.PNG");
        assert_eq!(image_mime(&png), "image/png");
        assert_eq!(image_file_name(&png), "Hat.PNG");
        assert_eq!(image_mime(Path::new("photo")), "image/jpeg");
    }

    #[tokio::test]
    async fn test_product_form_rejects_missing_image_file() {
        let form = ProductForm::new("Hat", Decimal::TEN, 1)
            .with_image("/definitely/not/here.jpg");
        let err = ApiClient::product_form(&form).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest { .. }));
    }

    #[tokio::test]
    async fn test_product_form_reads_image() {
        let mut file = tempfile::Builder::new().suffix(".webp").tempfile().unwrap();
        std::io::Write::write_all(&mut file, b"RIFF").unwrap();

        let form = ProductForm::new("Hat", Decimal::TEN, 1).with_image(file.path());
        assert!(ApiClient::product_form(&form).await.is_ok());
    }
}
