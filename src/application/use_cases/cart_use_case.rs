//! Cart screen operations and checkout.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::CartView;
use crate::application::error::ActionError;
use crate::application::session::SessionContext;
use crate::domain::entities::{AuthToken, Cart, CartItem, ProductId};
use crate::domain::ports::StorefrontPort;

pub const LOGIN_FOR_CART: &str = "Please log in to view your cart.";
pub const CART_FAILED: &str = "Failed to load cart";
pub const UPDATE_FAILED: &str = "Could not update quantity";
pub const REMOVE_FAILED: &str = "Could not remove item";
pub const ORDER_PLACED: &str = "Order placed successfully.";
pub const ORDER_FAILED: &str = "Could not place order";

/// Default number of "You may also like" products.
pub const DEFAULT_RELATED_ITEMS: usize = 4;

/// Loads and edits the signed-in user's cart.
#[derive(Clone)]
pub struct CartUseCase {
    storefront: Arc<dyn StorefrontPort>,
    session: SessionContext,
    related_items: usize,
}

impl CartUseCase {
    #[must_use]
    pub fn new(storefront: Arc<dyn StorefrontPort>, session: SessionContext) -> Self {
        Self {
            storefront,
            session,
            related_items: DEFAULT_RELATED_ITEMS,
        }
    }

    #[must_use]
    pub const fn with_related_items(mut self, count: usize) -> Self {
        self.related_items = count;
        self
    }

    fn token(&self) -> Result<AuthToken, ActionError> {
        self.session
            .token()
            .ok_or_else(|| ActionError::LoginRequired(LOGIN_FOR_CART.to_string()))
    }

    /// Fetches the cart, then the related products.
    ///
    /// # Errors
    /// Returns [`ActionError::LoginRequired`] without a session or when the
    /// server answers 401; otherwise the server message or a generic failure.
    pub async fn load(&self) -> Result<CartView, ActionError> {
        let token = self.token()?;

        let cart = self.storefront.cart(&token).await.map_err(|e| {
            warn!(error = %e, "Failed to fetch cart");
            if e.is_unauthorized() {
                ActionError::LoginRequired(e.user_message(CART_FAILED))
            } else {
                ActionError::from_api(&e, CART_FAILED)
            }
        })?;
        debug!(items = cart.items.len(), "Cart loaded");

        let related = match self.storefront.products().await {
            Ok(products) => products.into_iter().take(self.related_items).collect(),
            Err(e) => {
                warn!(error = %e, "Failed to fetch related products");
                Vec::new()
            }
        };

        Ok(CartView { cart, related })
    }

    /// Adds one unit to a line.
    ///
    /// # Errors
    /// Returns the server message or a generic failure.
    pub async fn increment(&self, item: &CartItem) -> Result<Cart, ActionError> {
        self.set_quantity(&item.product.id, item.quantity.saturating_add(1))
            .await
    }

    /// Removes one unit; the last unit removes the line.
    ///
    /// # Errors
    /// Returns the server message or a generic failure.
    pub async fn decrement(&self, item: &CartItem) -> Result<Cart, ActionError> {
        match item.decremented_quantity() {
            Some(quantity) => self.set_quantity(&item.product.id, quantity).await,
            None => self.remove(&item.product.id).await,
        }
    }

    /// # Errors
    /// Returns the server message or a generic failure.
    pub async fn set_quantity(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, ActionError> {
        let token = self.token()?;
        debug!(product_id = %product_id, quantity, "Updating cart line");
        self.storefront
            .update_cart_item(&token, product_id, quantity)
            .await
            .map_err(|e| {
                warn!(error = %e, "Cart update failed");
                ActionError::from_api(&e, UPDATE_FAILED)
            })
    }

    /// # Errors
    /// Returns the server message or a generic failure.
    pub async fn remove(&self, product_id: &ProductId) -> Result<Cart, ActionError> {
        let token = self.token()?;
        debug!(product_id = %product_id, "Removing cart line");
        self.storefront
            .remove_cart_item(&token, product_id)
            .await
            .map_err(|e| {
                warn!(error = %e, "Cart removal failed");
                ActionError::from_api(&e, REMOVE_FAILED)
            })
    }

    /// Places an order for the whole cart. Returns the success banner; the
    /// caller reloads the cart afterwards.
    ///
    /// # Errors
    /// Returns the server message or a generic failure.
    pub async fn checkout(&self) -> Result<&'static str, ActionError> {
        let token = self.token()?;
        self.storefront.create_order(&token).await.map_err(|e| {
            warn!(error = %e, "Checkout failed");
            ActionError::from_api(&e, ORDER_FAILED)
        })?;
        info!("Order placed");
        Ok(ORDER_PLACED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Product, User, UserRole};
    use crate::domain::errors::ApiError;
    use crate::domain::ports::mocks::MockStorefrontPort;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use tokio_test::assert_ok;

    fn signed_in() -> SessionContext {
        let session = SessionContext::new();
        session.set(User::new(
            "u1",
            "jane",
            "jane@example.com",
            AuthToken::new_unchecked("tok"),
            UserRole::User,
        ));
        session
    }

    fn line(id: &str, quantity: u32) -> CartItem {
        CartItem::new(Product::new(id, id, Decimal::new(4550, 2)), quantity)
    }

    fn catalog(count: usize) -> Vec<Product> {
        (0..count)
            .map(|i| Product::new(format!("p{i}"), format!("Item {i}"), Decimal::ONE))
            .collect()
    }

    #[tokio::test]
    async fn test_load_without_session_requires_login() {
        let mut storefront = MockStorefrontPort::new();
        storefront.expect_cart().never();

        let use_case = CartUseCase::new(Arc::new(storefront), SessionContext::new());
        let err = use_case.load().await.unwrap_err();

        assert!(err.requires_login());
    }

    #[tokio::test]
    async fn test_unauthorized_fetch_redirects_to_login() {
        let mut storefront = MockStorefrontPort::new();
        storefront
            .expect_cart()
            .returning(|_| Err(ApiError::from_status(401, Some("Token expired".into()))));
        storefront.expect_products().never();

        let use_case = CartUseCase::new(Arc::new(storefront), signed_in());
        let err = use_case.load().await.unwrap_err();

        assert!(err.requires_login());
        assert_eq!(err.message(), "Token expired");
    }

    #[tokio::test]
    async fn test_other_fetch_errors_stay_on_screen() {
        let mut storefront = MockStorefrontPort::new();
        storefront
            .expect_cart()
            .returning(|_| Err(ApiError::network("timed out")));

        let use_case = CartUseCase::new(Arc::new(storefront), signed_in());
        let err = use_case.load().await.unwrap_err();

        assert!(!err.requires_login());
        assert_eq!(err.message(), CART_FAILED);
    }

    #[tokio::test]
    async fn test_load_takes_first_related_products() {
        let mut storefront = MockStorefrontPort::new();
        storefront
            .expect_cart()
            .returning(|_| Ok(Cart::new(vec![line("a", 2)])));
        storefront.expect_products().returning(|| Ok(catalog(10)));

        let use_case = CartUseCase::new(Arc::new(storefront), signed_in());
        let view = assert_ok!(use_case.load().await);

        assert_eq!(view.related.len(), DEFAULT_RELATED_ITEMS);
        assert_eq!(view.related[0].id.as_str(), "p0");
        assert_eq!(view.total(), Decimal::new(9100, 2));
    }

    #[tokio::test]
    async fn test_related_failure_keeps_cart() {
        let mut storefront = MockStorefrontPort::new();
        storefront
            .expect_cart()
            .returning(|_| Ok(Cart::new(vec![line("a", 1)])));
        storefront
            .expect_products()
            .returning(|| Err(ApiError::network("down")));

        let use_case = CartUseCase::new(Arc::new(storefront), signed_in()).with_related_items(2);
        let view = use_case.load().await.unwrap();

        assert_eq!(view.cart.items.len(), 1);
        assert!(view.related.is_empty());
    }

    #[tokio::test]
    async fn test_increment_and_decrement() {
        let mut storefront = MockStorefrontPort::new();
        storefront
            .expect_update_cart_item()
            .with(eq(AuthToken::new_unchecked("tok")), eq(ProductId::from("a")), eq(3))
            .times(1)
            .returning(|_, id, q| Ok(Cart::new(vec![line(id.as_str(), q)])));
        storefront
            .expect_update_cart_item()
            .with(eq(AuthToken::new_unchecked("tok")), eq(ProductId::from("a")), eq(1))
            .times(1)
            .returning(|_, id, q| Ok(Cart::new(vec![line(id.as_str(), q)])));
        storefront
            .expect_remove_cart_item()
            .with(eq(AuthToken::new_unchecked("tok")), eq(ProductId::from("b")))
            .times(1)
            .returning(|_, _| Ok(Cart::default()));

        let use_case = CartUseCase::new(Arc::new(storefront), signed_in());

        let cart = use_case.increment(&line("a", 2)).await.unwrap();
        assert_eq!(cart.items[0].quantity, 3);

        let cart = use_case.decrement(&line("a", 2)).await.unwrap();
        assert_eq!(cart.items[0].quantity, 1);

        let cart = use_case.decrement(&line("b", 1)).await.unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_update_failure_message() {
        let mut storefront = MockStorefrontPort::new();
        storefront
            .expect_update_cart_item()
            .returning(|_, _, _| Err(ApiError::from_status(400, None)));
        storefront
            .expect_remove_cart_item()
            .returning(|_, _| Err(ApiError::from_status(404, Some("Item not in cart".into()))));

        let use_case = CartUseCase::new(Arc::new(storefront), signed_in());

        let err = use_case.increment(&line("a", 1)).await.unwrap_err();
        assert_eq!(err.message(), UPDATE_FAILED);
        let err = use_case.remove(&ProductId::from("a")).await.unwrap_err();
        assert_eq!(err.message(), "Item not in cart");
    }

    #[tokio::test]
    async fn test_checkout() {
        let mut storefront = MockStorefrontPort::new();
        storefront.expect_create_order().times(1).returning(|_| Ok(()));

        let use_case = CartUseCase::new(Arc::new(storefront), signed_in());
        assert_eq!(use_case.checkout().await, Ok(ORDER_PLACED));
    }

    #[tokio::test]
    async fn test_checkout_failure() {
        let mut storefront = MockStorefrontPort::new();
        storefront
            .expect_create_order()
            .returning(|_| Err(ApiError::from_status(400, Some("Cart is empty".into()))));

        let use_case = CartUseCase::new(Arc::new(storefront), signed_in());
        assert_eq!(
            use_case.checkout().await.unwrap_err().message(),
            "Cart is empty"
        );
    }
}
