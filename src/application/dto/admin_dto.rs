//! Admin DTOs.

use rust_decimal::Decimal;

use crate::domain::entities::Order;

/// Raw product form fields as typed by the admin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
    /// Path of the image file to upload.
    pub image: String,
}

/// Dashboard counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub products: usize,
    pub orders: usize,
    pub categories: usize,
    pub pending_orders: usize,
    /// Sum of order totals.
    pub revenue: Decimal,
    /// Five newest orders.
    pub recent_orders: Vec<Order>,
}
