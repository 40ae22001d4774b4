//! Storefront DTOs.

use rust_decimal::Decimal;

use crate::domain::entities::{Cart, Order, OrderStatus, Product, count_by_status};

/// Cart screen contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartView {
    pub cart: Cart,
    /// "You may also like" products.
    pub related: Vec<Product>,
}

impl CartView {
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }
}

/// Per-status counters shown on the profile screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSummary {
    pub pending: usize,
    pub processing: usize,
    pub shipped: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

impl OrderSummary {
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        let counts = count_by_status(orders);
        let get = |status: OrderStatus| counts.get(&status).copied().unwrap_or_default();
        Self {
            // Confirmed orders have not shipped yet; they count as pending.
            pending: get(OrderStatus::Pending) + get(OrderStatus::Confirmed),
            processing: get(OrderStatus::Processing),
            shipped: get(OrderStatus::Shipped),
            delivered: get(OrderStatus::Delivered),
            cancelled: get(OrderStatus::Cancelled),
        }
    }
}

/// Profile screen contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileView {
    pub orders: Vec<Order>,
    pub summary: OrderSummary,
}
