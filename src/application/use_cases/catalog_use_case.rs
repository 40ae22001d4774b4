//! Product browsing and add-to-cart.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::error::ActionError;
use crate::application::session::SessionContext;
use crate::domain::entities::{Category, Product, ProductId};
use crate::domain::ports::StorefrontPort;

pub const PRODUCTS_FAILED: &str = "Failed to load products";
pub const PRODUCT_FAILED: &str = "Failed to load product";
pub const SEARCH_FAILED: &str = "Search failed";
pub const CATEGORIES_FAILED: &str = "Failed to load categories";
pub const LOGIN_TO_ADD: &str = "Please log in to add items to cart.";
pub const ADDED_TO_CART: &str = "Product added to cart!";
pub const ADD_REJECTED: &str = "Failed to add product to cart.";
pub const ADD_FAILED: &str = "Could not add to cart";

/// Catalog reads and the add-to-cart action of the detail screen.
#[derive(Clone)]
pub struct CatalogUseCase {
    storefront: Arc<dyn StorefrontPort>,
    session: SessionContext,
}

impl CatalogUseCase {
    #[must_use]
    pub fn new(storefront: Arc<dyn StorefrontPort>, session: SessionContext) -> Self {
        Self {
            storefront,
            session,
        }
    }

    /// # Errors
    /// Returns the server message or a generic failure.
    pub async fn products(&self) -> Result<Vec<Product>, ActionError> {
        self.storefront.products().await.map_err(|e| {
            warn!(error = %e, "Failed to fetch products");
            ActionError::from_api(&e, PRODUCTS_FAILED)
        })
    }

    /// Searches the catalog. A blank query lists everything.
    ///
    /// # Errors
    /// Returns the server message or a generic failure.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ActionError> {
        let query = query.trim();
        if query.is_empty() {
            return self.products().await;
        }
        debug!(query, "Searching products");
        self.storefront.search_products(query).await.map_err(|e| {
            warn!(error = %e, "Product search failed");
            ActionError::from_api(&e, SEARCH_FAILED)
        })
    }

    /// # Errors
    /// Always reports a generic failure; server details are only logged.
    pub async fn product(&self, id: &ProductId) -> Result<Product, ActionError> {
        self.storefront.product(id).await.map_err(|e| {
            warn!(error = %e, product_id = %id, "Failed to fetch product");
            ActionError::failed(PRODUCT_FAILED)
        })
    }

    /// # Errors
    /// Returns the server message or a generic failure.
    pub async fn categories(&self) -> Result<Vec<Category>, ActionError> {
        self.storefront.categories().await.map_err(|e| {
            warn!(error = %e, "Failed to fetch categories");
            ActionError::from_api(&e, CATEGORIES_FAILED)
        })
    }

    /// Adds one unit of a product to the cart. Returns the success banner.
    ///
    /// # Errors
    /// Returns [`ActionError::LoginRequired`] without a session, otherwise a
    /// failure banner.
    pub async fn add_to_cart(&self, id: &ProductId) -> Result<&'static str, ActionError> {
        let token = self
            .session
            .token()
            .ok_or_else(|| ActionError::LoginRequired(LOGIN_TO_ADD.to_string()))?;

        match self.storefront.add_to_cart(&token, id, 1).await {
            Ok(true) => {
                info!(product_id = %id, "Added to cart");
                Ok(ADDED_TO_CART)
            }
            Ok(false) => {
                warn!(product_id = %id, "Server declined add to cart");
                Err(ActionError::failed(ADD_REJECTED))
            }
            Err(e) => {
                warn!(error = %e, product_id = %id, "Add to cart failed");
                Err(ActionError::failed(ADD_FAILED))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AuthToken, User, UserRole};
    use crate::domain::errors::ApiError;
    use crate::domain::ports::mocks::MockStorefrontPort;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

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

    #[tokio::test]
    async fn test_add_to_cart_requires_session() {
        let mut storefront = MockStorefrontPort::new();
        storefront.expect_add_to_cart().never();

        let use_case = CatalogUseCase::new(Arc::new(storefront), SessionContext::new());
        let err = use_case.add_to_cart(&ProductId::from("p1")).await.unwrap_err();

        assert!(err.requires_login());
        assert_eq!(err.message(), LOGIN_TO_ADD);
    }

    #[tokio::test]
    async fn test_add_to_cart_outcomes() {
        let mut storefront = MockStorefrontPort::new();
        storefront
            .expect_add_to_cart()
            .withf(|token, id, qty| token.as_str() == "tok" && id.as_str() == "p1" && *qty == 1)
            .times(1)
            .returning(|_, _, _| Ok(true));
        storefront
            .expect_add_to_cart()
            .withf(|_, id, _| id.as_str() == "p2")
            .returning(|_, _, _| Ok(false));
        storefront
            .expect_add_to_cart()
            .withf(|_, id, _| id.as_str() == "p3")
            .returning(|_, _, _| Err(ApiError::from_status(500, Some("boom".into()))));

        let use_case = CatalogUseCase::new(Arc::new(storefront), signed_in());

        assert_eq!(use_case.add_to_cart(&ProductId::from("p1")).await, Ok(ADDED_TO_CART));
        assert_eq!(
            use_case.add_to_cart(&ProductId::from("p2")).await.unwrap_err().message(),
            ADD_REJECTED
        );
        assert_eq!(
            use_case.add_to_cart(&ProductId::from("p3")).await.unwrap_err().message(),
            ADD_FAILED
        );
    }

    #[tokio::test]
    async fn test_product_failure_hides_server_detail() {
        let mut storefront = MockStorefrontPort::new();
        storefront
            .expect_product()
            .with(eq(ProductId::from("missing")))
            .returning(|_| Err(ApiError::from_status(404, Some("Not found".into()))));

        let use_case = CatalogUseCase::new(Arc::new(storefront), SessionContext::new());
        let err = use_case.product(&ProductId::from("missing")).await.unwrap_err();

        assert_eq!(err.message(), PRODUCT_FAILED);
    }

    #[tokio::test]
    async fn test_blank_search_lists_all_products() {
        let mut storefront = MockStorefrontPort::new();
        storefront.expect_search_products().never();
        storefront
            .expect_products()
            .times(1)
            .returning(|| Ok(vec![Product::new("p1", "Sneakers", Decimal::new(125, 0))]));

        let use_case = CatalogUseCase::new(Arc::new(storefront), SessionContext::new());
        let products = use_case.search("   ").await.unwrap();

        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_search_trims_query() {
        let mut storefront = MockStorefrontPort::new();
        storefront
            .expect_search_products()
            .with(eq("dress"))
            .returning(|_| Ok(Vec::new()));

        let use_case = CatalogUseCase::new(Arc::new(storefront), SessionContext::new());
        assert!(use_case.search(" dress ").await.unwrap().is_empty());
    }
}
