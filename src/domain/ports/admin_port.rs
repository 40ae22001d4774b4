//! Admin port: product, category and order management.

use std::path::PathBuf;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::entities::{AuthToken, Order, OrderStatus, ProductId};
use crate::domain::errors::ApiError;

/// Product fields sent as a multipart form on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: u32,
    /// Local file uploaded as the `image` part.
    pub image: Option<PathBuf>,
}

impl ProductForm {
    #[must_use]
    pub fn new(name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            quantity,
            image: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.trim().is_empty()).then_some(description);
        self
    }

    #[must_use]
    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }
}

/// Port for the admin endpoints. All calls need an admin bearer token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminPort: Send + Sync {
    async fn create_product(&self, token: &AuthToken, form: &ProductForm) -> Result<(), ApiError>;

    async fn update_product(
        &self,
        token: &AuthToken,
        id: &ProductId,
        form: &ProductForm,
    ) -> Result<(), ApiError>;

    async fn delete_product(&self, token: &AuthToken, id: &ProductId) -> Result<(), ApiError>;

    async fn create_category(&self, token: &AuthToken, name: &str) -> Result<(), ApiError>;

    /// Every order in the shop.
    async fn orders(&self, token: &AuthToken) -> Result<Vec<Order>, ApiError>;

    async fn update_order_status(
        &self,
        token: &AuthToken,
        order_id: &str,
        status: &OrderStatus,
    ) -> Result<(), ApiError>;
}
