//! Admin console operations.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::application::dto::{DashboardStats, ProductInput};
use crate::application::error::ActionError;
use crate::application::session::SessionContext;
use crate::domain::entities::{AuthToken, Category, Order, OrderFilter, OrderStatus, ProductId};
use crate::domain::errors::ValidationError;
use crate::domain::ports::{AdminPort, ProductForm, StorefrontPort};
use crate::domain::validation::FieldErrors;

pub const LOGIN_AS_ADMIN: &str = "Please log in as an admin.";
pub const CREATE_REQUIRED: &str = "Name, price, quantity and image are required";
pub const UPDATE_REQUIRED: &str = "Name, price and quantity are required";
pub const PRODUCT_CREATED: &str = "Product created";
pub const PRODUCT_UPDATED: &str = "Product updated";
pub const PRODUCT_DELETED: &str = "Product deleted";
pub const CREATE_FAILED: &str = "Failed to create product";
pub const UPDATE_FAILED: &str = "Failed to update product";
pub const DELETE_FAILED: &str = "Failed to delete product";
pub const CATEGORY_REQUIRED: &str = "Category name is required";
pub const CATEGORY_CREATED: &str = "Category created";
pub const CATEGORY_FAILED: &str = "Failed to create category";
pub const ORDERS_FAILED: &str = "Failed to load orders";
pub const STATUS_UPDATED: &str = "Order status updated";
pub const STATUS_FAILED: &str = "Failed to update status";
pub const DASHBOARD_FAILED: &str = "Failed to load dashboard";

const RECENT_ORDERS: usize = 5;

/// Product, category and order management for admins.
#[derive(Clone)]
pub struct AdminUseCase {
    admin: Arc<dyn AdminPort>,
    storefront: Arc<dyn StorefrontPort>,
    session: SessionContext,
}

impl AdminUseCase {
    #[must_use]
    pub fn new(
        admin: Arc<dyn AdminPort>,
        storefront: Arc<dyn StorefrontPort>,
        session: SessionContext,
    ) -> Self {
        Self {
            admin,
            storefront,
            session,
        }
    }

    fn token(&self) -> Result<AuthToken, ActionError> {
        self.session
            .token()
            .ok_or_else(|| ActionError::LoginRequired(LOGIN_AS_ADMIN.to_string()))
    }

    /// Counters and recent orders for the dashboard.
    ///
    /// # Errors
    /// Fails when products or orders cannot be fetched. Categories are
    /// optional and count as zero when unavailable.
    pub async fn dashboard(&self) -> Result<DashboardStats, ActionError> {
        let token = self.token()?;

        let (products, orders, categories) = tokio::join!(
            self.storefront.products(),
            self.admin.orders(&token),
            self.storefront.categories(),
        );

        let products = products.map_err(|e| {
            warn!(error = %e, "Dashboard products fetch failed");
            ActionError::from_api(&e, DASHBOARD_FAILED)
        })?;
        let orders = orders.map_err(|e| {
            warn!(error = %e, "Dashboard orders fetch failed");
            ActionError::from_api(&e, DASHBOARD_FAILED)
        })?;
        let categories = categories.map_or_else(
            |e| {
                warn!(error = %e, "Dashboard categories fetch failed");
                0
            },
            |c| c.len(),
        );

        Ok(summarize(products.len(), categories, &orders))
    }

    /// Creates a product from the raw form fields.
    ///
    /// # Errors
    /// Returns a validation error for missing or malformed fields, else the
    /// server message or a generic failure.
    pub async fn create_product(&self, input: &ProductInput) -> Result<&'static str, ActionError> {
        let form = parse_form(input, true)?;
        let token = self.token()?;
        self.admin
            .create_product(&token, &form)
            .await
            .map_err(|e| {
                warn!(error = %e, "Product create failed");
                ActionError::from_api(&e, CREATE_FAILED)
            })?;
        info!(name = %form.name, "Product created");
        Ok(PRODUCT_CREATED)
    }

    /// Updates a product. The image is only replaced when a path is given.
    ///
    /// # Errors
    /// Returns a validation error for missing or malformed fields, else the
    /// server message or a generic failure.
    pub async fn update_product(
        &self,
        id: &ProductId,
        input: &ProductInput,
    ) -> Result<&'static str, ActionError> {
        let form = parse_form(input, false)?;
        let token = self.token()?;
        self.admin
            .update_product(&token, id, &form)
            .await
            .map_err(|e| {
                warn!(error = %e, product_id = %id, "Product update failed");
                ActionError::from_api(&e, UPDATE_FAILED)
            })?;
        info!(product_id = %id, "Product updated");
        Ok(PRODUCT_UPDATED)
    }

    /// Deletes a product. The caller asks for confirmation first.
    ///
    /// # Errors
    /// Returns the server message or a generic failure.
    pub async fn delete_product(&self, id: &ProductId) -> Result<&'static str, ActionError> {
        let token = self.token()?;
        self.admin.delete_product(&token, id).await.map_err(|e| {
            warn!(error = %e, product_id = %id, "Product delete failed");
            ActionError::from_api(&e, DELETE_FAILED)
        })?;
        info!(product_id = %id, "Product deleted");
        Ok(PRODUCT_DELETED)
    }

    /// Lists categories for the categories screen.
    ///
    /// # Errors
    /// Returns the server message or a generic failure.
    pub async fn categories(&self) -> Result<Vec<Category>, ActionError> {
        self.storefront.categories().await.map_err(|e| {
            warn!(error = %e, "Categories fetch failed");
            ActionError::from_api(&e, "Failed to load categories")
        })
    }

    /// # Errors
    /// Returns a validation error for an empty name, else the server message
    /// or a generic failure.
    pub async fn create_category(&self, name: &str) -> Result<&'static str, ActionError> {
        let name = name.trim();
        FieldErrors::new()
            .require("name", name, CATEGORY_REQUIRED)
            .into_result(CATEGORY_REQUIRED)?;
        let token = self.token()?;
        self.admin.create_category(&token, name).await.map_err(|e| {
            warn!(error = %e, "Category create failed");
            ActionError::from_api(&e, CATEGORY_FAILED)
        })?;
        info!(name, "Category created");
        Ok(CATEGORY_CREATED)
    }

    /// Every order in the shop.
    ///
    /// # Errors
    /// Returns the server message or a generic failure.
    pub async fn orders(&self) -> Result<Vec<Order>, ActionError> {
        let token = self.token()?;
        self.admin.orders(&token).await.map_err(|e| {
            warn!(error = %e, "Orders fetch failed");
            ActionError::from_api(&e, ORDERS_FAILED)
        })
    }

    /// # Errors
    /// Returns the server message or a generic failure.
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: &OrderStatus,
    ) -> Result<&'static str, ActionError> {
        let token = self.token()?;
        debug!(order_id, status = %status, "Updating order status");
        self.admin
            .update_order_status(&token, order_id, status)
            .await
            .map_err(|e| {
                warn!(error = %e, order_id, "Order status update failed");
                ActionError::from_api(&e, STATUS_FAILED)
            })?;
        info!(order_id, status = %status, "Order status updated");
        Ok(STATUS_UPDATED)
    }
}

/// Builds dashboard counters from fetched lists.
#[must_use]
pub fn summarize(products: usize, categories: usize, orders: &[Order]) -> DashboardStats {
    let recent_orders = OrderFilter::default()
        .apply(orders)
        .into_iter()
        .take(RECENT_ORDERS)
        .cloned()
        .collect();

    DashboardStats {
        products,
        orders: orders.len(),
        categories,
        pending_orders: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count(),
        revenue: orders
            .iter()
            .map(|o| o.total)
            .fold(Decimal::ZERO, Decimal::saturating_add),
        recent_orders,
    }
}

/// Validates and converts the raw product form.
///
/// # Errors
/// Returns the required-fields banner for empty fields, or per-field errors
/// for a malformed price or quantity.
pub fn parse_form(input: &ProductInput, image_required: bool) -> Result<ProductForm, ValidationError> {
    let name = input.name.trim();
    let price = input.price.trim();
    let quantity = input.quantity.trim();
    let image = input.image.trim();

    let mut required = FieldErrors::new()
        .require("name", name, "Name is required")
        .require("price", price, "Price is required")
        .require("quantity", quantity, "Quantity is required");
    let banner = if image_required {
        required = required.require("image", image, "Image is required");
        CREATE_REQUIRED
    } else {
        UPDATE_REQUIRED
    };
    required.into_result(banner)?;

    let mut malformed = FieldErrors::new();
    let parsed_price = Decimal::from_str(price).ok().filter(|p| !p.is_sign_negative());
    if parsed_price.is_none() {
        malformed.insert("price", "Price must be a non-negative number");
    }
    let parsed_quantity = quantity.parse::<u32>().ok();
    if parsed_quantity.is_none() {
        malformed.insert("quantity", "Quantity must be a whole number");
    }

    let (Some(price), Some(quantity)) = (parsed_price, parsed_quantity) else {
        return Err(ValidationError::new("Please fix the highlighted fields.", malformed));
    };

    let mut form = ProductForm::new(name, price, quantity).with_description(input.description.trim());
    if !image.is_empty() {
        form = form.with_image(PathBuf::from(image));
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{OrderCustomer, Product, User, UserRole};
    use crate::domain::errors::ApiError;
    use crate::domain::ports::mocks::{MockAdminPort, MockStorefrontPort};
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;

    fn admin_session() -> SessionContext {
        let session = SessionContext::new();
        session.set(User::new(
            "a1",
            "root",
            "admin@shop.io",
            AuthToken::new_unchecked("admin-tok"),
            UserRole::Admin,
        ));
        session
    }

    fn input(name: &str, price: &str, quantity: &str, image: &str) -> ProductInput {
        ProductInput {
            name: name.into(),
            description: String::new(),
            price: price.into(),
            quantity: quantity.into(),
            image: image.into(),
        }
    }

    fn order(id: &str, status: OrderStatus, total: i64, day: u32) -> Order {
        Order {
            id: id.into(),
            user: Some(OrderCustomer::Id("u1".into())),
            items: Vec::new(),
            status,
            total: Decimal::new(total, 0),
            created_at: Utc.with_ymd_and_hms(2024, 2, day, 9, 0, 0).single(),
        }
    }

    #[test]
    fn test_parse_form_requires_image_on_create() {
        let err = parse_form(&input("Hat", "10", "3", ""), true).unwrap_err();
        assert_eq!(err.banner(), CREATE_REQUIRED);
        assert_eq!(err.fields().get("image"), Some("Image is required"));

        let form = parse_form(&input("Hat", "10", "3", ""), false).unwrap();
        assert_eq!(form.image, None);
    }

    #[test]
    fn test_parse_form_rejects_malformed_numbers() {
        let err = parse_form(&input("Hat", "ten", "-1", "hat.png"), true).unwrap_err();
        assert_eq!(err.fields().len(), 2);
        assert!(err.fields().get("price").is_some());
        assert!(err.fields().get("quantity").is_some());
    }

    #[test]
    fn test_parse_form_builds_multipart_fields() {
        let mut raw = input(" Hat ", "12.50", "4", "/tmp/hat.png");
        raw.description = "Wool".into();

        let form = parse_form(&raw, true).unwrap();

        assert_eq!(form.name, "Hat");
        assert_eq!(form.price, Decimal::new(1250, 2));
        assert_eq!(form.quantity, 4);
        assert_eq!(form.description.as_deref(), Some("Wool"));
        assert_eq!(form.image, Some(PathBuf::from("/tmp/hat.png")));
    }

    #[test]
    fn test_summarize() {
        let orders = vec![
            order("o1", OrderStatus::Pending, 100, 1),
            order("o2", OrderStatus::Delivered, 50, 3),
            order("o3", OrderStatus::Pending, 25, 2),
            order("o4", OrderStatus::Shipped, 10, 4),
            order("o5", OrderStatus::Cancelled, 5, 5),
            order("o6", OrderStatus::Processing, 1, 6),
        ];

        let stats = summarize(12, 4, &orders);

        assert_eq!(stats.products, 12);
        assert_eq!(stats.orders, 6);
        assert_eq!(stats.pending_orders, 2);
        assert_eq!(stats.revenue, Decimal::new(191, 0));
        let recent: Vec<&str> = stats.recent_orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(recent, vec!["o6", "o5", "o4", "o2", "o3"]);
    }

    #[tokio::test]
    async fn test_create_product_sends_form() {
        let mut admin = MockAdminPort::new();
        admin
            .expect_create_product()
            .withf(|token, form| token.as_str() == "admin-tok" && form.name == "Hat")
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = AdminUseCase::new(
            Arc::new(admin),
            Arc::new(MockStorefrontPort::new()),
            admin_session(),
        );

        let message = use_case
            .create_product(&input("Hat", "10", "3", "hat.png"))
            .await
            .unwrap();
        assert_eq!(message, PRODUCT_CREATED);
    }

    #[tokio::test]
    async fn test_create_product_validation_skips_request() {
        let mut admin = MockAdminPort::new();
        admin.expect_create_product().never();

        let use_case = AdminUseCase::new(
            Arc::new(admin),
            Arc::new(MockStorefrontPort::new()),
            admin_session(),
        );

        let err = use_case
            .create_product(&input("", "", "", ""))
            .await
            .unwrap_err();
        assert_eq!(err.message(), CREATE_REQUIRED);
    }

    #[tokio::test]
    async fn test_delete_and_status_errors_use_server_message() {
        let mut admin = MockAdminPort::new();
        admin
            .expect_delete_product()
            .with(eq(AuthToken::new_unchecked("admin-tok")), eq(ProductId::from("p1")))
            .returning(|_, _| Err(ApiError::from_status(403, Some("Forbidden".into()))));
        admin
            .expect_update_order_status()
            .withf(|_, id, status| id == "o1" && *status == OrderStatus::Shipped)
            .returning(|_, _, _| Err(ApiError::network("reset")));

        let use_case = AdminUseCase::new(
            Arc::new(admin),
            Arc::new(MockStorefrontPort::new()),
            admin_session(),
        );

        let err = use_case.delete_product(&ProductId::from("p1")).await.unwrap_err();
        assert_eq!(err.message(), "Forbidden");

        let err = use_case
            .update_order_status("o1", &OrderStatus::Shipped)
            .await
            .unwrap_err();
        assert_eq!(err.message(), STATUS_FAILED);
    }

    #[tokio::test]
    async fn test_create_category_requires_name() {
        let mut admin = MockAdminPort::new();
        admin.expect_create_category().never();

        let use_case = AdminUseCase::new(
            Arc::new(admin),
            Arc::new(MockStorefrontPort::new()),
            admin_session(),
        );

        let err = use_case.create_category("   ").await.unwrap_err();
        assert_eq!(err.message(), CATEGORY_REQUIRED);
    }

    #[tokio::test]
    async fn test_dashboard_tolerates_missing_categories() {
        let mut admin = MockAdminPort::new();
        admin
            .expect_orders()
            .returning(|_| Ok(vec![order("o1", OrderStatus::Pending, 20, 1)]));
        let mut storefront = MockStorefrontPort::new();
        storefront
            .expect_products()
            .returning(|| Ok(vec![Product::new("p1", "Hat", Decimal::TEN)]));
        storefront
            .expect_categories()
            .returning(|| Err(ApiError::from_status(500, None)));

        let use_case = AdminUseCase::new(Arc::new(admin), Arc::new(storefront), admin_session());
        let stats = use_case.dashboard().await.unwrap();

        assert_eq!(stats.products, 1);
        assert_eq!(stats.categories, 0);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.revenue, Decimal::new(20, 0));
    }

    #[tokio::test]
    async fn test_requires_session() {
        let use_case = AdminUseCase::new(
            Arc::new(MockAdminPort::new()),
            Arc::new(MockStorefrontPort::new()),
            SessionContext::new(),
        );

        assert!(use_case.orders().await.unwrap_err().requires_login());
    }
}
