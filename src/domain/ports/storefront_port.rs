//! Storefront port: catalog, cart and customer orders.

use async_trait::async_trait;

use crate::domain::entities::{AuthToken, Cart, Category, Order, Product, ProductId};
use crate::domain::errors::ApiError;

/// Port for the customer-facing shop endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorefrontPort: Send + Sync {
    /// Lists every product.
    async fn products(&self) -> Result<Vec<Product>, ApiError>;

    /// Fetches a single product.
    async fn product(&self, id: &ProductId) -> Result<Product, ApiError>;

    /// Server-side product search.
    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ApiError>;

    /// Lists categories.
    async fn categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Fetches the signed-in user's cart. A missing cart is an empty one.
    async fn cart(&self, token: &AuthToken) -> Result<Cart, ApiError>;

    /// Adds a product; returns the server's `success` flag.
    async fn add_to_cart(
        &self,
        token: &AuthToken,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<bool, ApiError>;

    /// Sets the quantity of a cart line and returns the updated cart.
    async fn update_cart_item(
        &self,
        token: &AuthToken,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, ApiError>;

    /// Removes a cart line and returns the updated cart.
    async fn remove_cart_item(
        &self,
        token: &AuthToken,
        product_id: &ProductId,
    ) -> Result<Cart, ApiError>;

    /// Places an order from the current cart.
    async fn create_order(&self, token: &AuthToken) -> Result<(), ApiError>;

    /// Orders placed by the signed-in user.
    async fn my_orders(&self, token: &AuthToken) -> Result<Vec<Order>, ApiError>;
}
