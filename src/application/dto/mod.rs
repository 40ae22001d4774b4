//! Data transfer objects for the application layer.

mod admin_dto;
mod auth_dto;
mod storefront_dto;

pub use admin_dto::{DashboardStats, ProductInput};
pub use auth_dto::{LoginResponse, ResetStep};
pub use storefront_dto::{CartView, OrderSummary, ProfileView};
