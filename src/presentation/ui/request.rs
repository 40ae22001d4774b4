//! Background work requested by screens and the results sent back.

use std::sync::Arc;

use tracing::debug;

use crate::application::dto::{CartView, DashboardStats, LoginResponse, ProductInput, ProfileView, ResetStep};
use crate::application::use_cases::{
    AdminUseCase, CartUseCase, CatalogUseCase, LOGIN_FAILED, LoginUseCase, PasswordResetUseCase,
    ProfileUseCase, RegisterUseCase,
};
use crate::application::{ActionError, SessionContext};
use crate::domain::entities::{Cart, CartItem, Category, Order, OrderStatus, Product, ProductId};
use crate::domain::navigation::Route;
use crate::domain::ports::{AdminPort, AuthPort, SessionStoragePort, StorefrontPort};

/// One call against the shop API.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Login {
        email: String,
        password: String,
    },
    Register {
        username: String,
        email: String,
        password: String,
    },
    RequestOtp {
        email: String,
    },
    ResendOtp {
        email: String,
    },
    ResetPassword {
        email: String,
        otp: String,
        new_password: String,
    },
    Logout,
    Products,
    Search(String),
    Categories,
    Product(ProductId),
    AddToCart(ProductId),
    Cart,
    Increment(CartItem),
    Decrement(CartItem),
    RemoveItem(ProductId),
    Checkout,
    Profile,
    Dashboard,
    AdminCategories,
    CreateCategory(String),
    CreateProduct(ProductInput),
    UpdateProduct(ProductId, ProductInput),
    DeleteProduct(ProductId),
    Orders,
    UpdateOrderStatus {
        order_id: String,
        status: OrderStatus,
    },
}

/// Successful result of a [`Request`].
#[derive(Debug, Clone)]
pub enum Outcome {
    SignedIn(LoginResponse),
    SignedOut(Route),
    ResetStep(ResetStep),
    Products(Vec<Product>),
    Categories(Vec<Category>),
    Product(Product),
    Cart(CartView),
    CartItems(Cart),
    Profile(ProfileView),
    Dashboard(DashboardStats),
    Orders(Vec<Order>),
    /// A mutation succeeded; `reload` refreshes the screen afterwards.
    Done {
        message: &'static str,
        reload: Option<Request>,
    },
}

/// Every use case the screens can reach, cheap to clone into a task.
#[derive(Clone)]
pub struct UseCases {
    pub login: LoginUseCase,
    pub register: RegisterUseCase,
    pub password_reset: PasswordResetUseCase,
    pub catalog: CatalogUseCase,
    pub cart: CartUseCase,
    pub profile: ProfileUseCase,
    pub admin: AdminUseCase,
}

impl UseCases {
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthPort>,
        storefront: Arc<dyn StorefrontPort>,
        admin: Arc<dyn AdminPort>,
        storage: Arc<dyn SessionStoragePort>,
        session: &SessionContext,
        related_items: usize,
    ) -> Self {
        let login = LoginUseCase::new(auth.clone(), storage, session.clone());
        Self {
            register: RegisterUseCase::new(auth.clone(), login.clone()),
            password_reset: PasswordResetUseCase::new(auth),
            catalog: CatalogUseCase::new(storefront.clone(), session.clone()),
            cart: CartUseCase::new(storefront.clone(), session.clone())
                .with_related_items(related_items),
            profile: ProfileUseCase::new(storefront.clone(), session.clone()),
            admin: AdminUseCase::new(admin, storefront, session.clone()),
            login,
        }
    }

    /// Runs one request to completion.
    ///
    /// # Errors
    /// Returns the action error to show in the status banner.
    pub async fn run(&self, request: Request) -> Result<Outcome, ActionError> {
        debug!(request = request.name(), "Running request");

        let outcome = match request {
            Request::Login { email, password } => Outcome::SignedIn(
                self.login
                    .execute(&email, &password)
                    .await
                    .map_err(|e| ActionError::from_auth(e, LOGIN_FAILED))?,
            ),
            Request::Register {
                username,
                email,
                password,
            } => Outcome::SignedIn(self.register.execute(&username, &email, &password).await?),
            Request::RequestOtp { email } => {
                Outcome::ResetStep(self.password_reset.request_otp(&email).await?)
            }
            Request::ResendOtp { email } => {
                Outcome::ResetStep(self.password_reset.resend_otp(&email).await?)
            }
            Request::ResetPassword {
                email,
                otp,
                new_password,
            } => Outcome::ResetStep(
                self.password_reset
                    .confirm(&email, &otp, &new_password)
                    .await?,
            ),
            Request::Logout => Outcome::SignedOut(self.login.logout().await),
            Request::Products => Outcome::Products(self.catalog.products().await?),
            Request::Search(query) => Outcome::Products(self.catalog.search(&query).await?),
            Request::Categories => Outcome::Categories(self.catalog.categories().await?),
            Request::Product(id) => Outcome::Product(self.catalog.product(&id).await?),
            Request::AddToCart(id) => Outcome::Done {
                message: self.catalog.add_to_cart(&id).await?,
                reload: None,
            },
            Request::Cart => Outcome::Cart(self.cart.load().await?),
            Request::Increment(item) => Outcome::CartItems(self.cart.increment(&item).await?),
            Request::Decrement(item) => Outcome::CartItems(self.cart.decrement(&item).await?),
            Request::RemoveItem(id) => Outcome::CartItems(self.cart.remove(&id).await?),
            Request::Checkout => Outcome::Done {
                message: self.cart.checkout().await?,
                reload: Some(Request::Cart),
            },
            Request::Profile => Outcome::Profile(self.profile.load().await?),
            Request::Dashboard => Outcome::Dashboard(self.admin.dashboard().await?),
            Request::AdminCategories => Outcome::Categories(self.admin.categories().await?),
            Request::CreateCategory(name) => Outcome::Done {
                message: self.admin.create_category(&name).await?,
                reload: Some(Request::AdminCategories),
            },
            Request::CreateProduct(input) => Outcome::Done {
                message: self.admin.create_product(&input).await?,
                reload: Some(Request::Products),
            },
            Request::UpdateProduct(id, input) => Outcome::Done {
                message: self.admin.update_product(&id, &input).await?,
                reload: Some(Request::Products),
            },
            Request::DeleteProduct(id) => Outcome::Done {
                message: self.admin.delete_product(&id).await?,
                reload: Some(Request::Products),
            },
            Request::Orders => Outcome::Orders(self.admin.orders().await?),
            Request::UpdateOrderStatus { order_id, status } => Outcome::Done {
                message: self.admin.update_order_status(&order_id, &status).await?,
                reload: Some(Request::Orders),
            },
        };

        Ok(outcome)
    }
}

impl Request {
    /// Short name for logs. Never includes credentials.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
            Self::RequestOtp { .. } => "request_otp",
            Self::ResendOtp { .. } => "resend_otp",
            Self::ResetPassword { .. } => "reset_password",
            Self::Logout => "logout",
            Self::Products => "products",
            Self::Search(_) => "search",
            Self::Categories => "categories",
            Self::Product(_) => "product",
            Self::AddToCart(_) => "add_to_cart",
            Self::Cart => "cart",
            Self::Increment(_) => "increment",
            Self::Decrement(_) => "decrement",
            Self::RemoveItem(_) => "remove_item",
            Self::Checkout => "checkout",
            Self::Profile => "profile",
            Self::Dashboard => "dashboard",
            Self::AdminCategories => "admin_categories",
            Self::CreateCategory(_) => "create_category",
            Self::CreateProduct(_) => "create_product",
            Self::UpdateProduct(..) => "update_product",
            Self::DeleteProduct(_) => "delete_product",
            Self::Orders => "orders",
            Self::UpdateOrderStatus { .. } => "update_order_status",
        }
    }
}
