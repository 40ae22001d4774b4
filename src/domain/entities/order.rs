//! Orders and order filtering.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::serde_utils;

/// Order lifecycle status. Unknown server values are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// Statuses an admin can assign from the orders screen.
    pub const ADMIN_CHOICES: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Every known status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Other(raw) => raw,
        }
    }

    /// Capitalized label for display.
    #[must_use]
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "processing" => Self::Processing,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who placed the order: a bare id or a populated profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderCustomer {
    Profile {
        email: String,
        #[serde(default)]
        username: Option<String>,
    },
    Id(String),
}

impl OrderCustomer {
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            Self::Profile {
                username: Some(name),
                ..
            } if !name.is_empty() => name,
            Self::Profile { email, .. } => email,
            Self::Id(id) => id,
        }
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Profile { email, .. } => Some(email),
            Self::Id(_) => None,
        }
    }
}

/// Product snapshot embedded in an order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProduct {
    #[serde(rename = "prodName")]
    pub name: String,
    #[serde(rename = "prodPrice", default)]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "productId", default)]
    pub product: Option<OrderProduct>,
    #[serde(deserialize_with = "serde_utils::quantity")]
    pub quantity: u32,
}

impl OrderItem {
    #[must_use]
    pub fn name(&self) -> &str {
        self.product
            .as_ref()
            .map_or("(removed product)", |p| p.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<OrderCustomer>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    #[serde(default)]
    pub total: Decimal,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    #[must_use]
    pub fn customer_label(&self) -> &str {
        self.user.as_ref().map_or("unknown", OrderCustomer::display)
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |count: u32, item| count.saturating_add(item.quantity))
    }

    fn matches_query(&self, needle: &str) -> bool {
        if self.id.to_lowercase().contains(needle) {
            return true;
        }
        match &self.user {
            Some(OrderCustomer::Profile { email, username }) => {
                email.to_lowercase().contains(needle)
                    || username
                        .as_deref()
                        .is_some_and(|u| u.to_lowercase().contains(needle))
            }
            Some(OrderCustomer::Id(id)) => id.to_lowercase().contains(needle),
            None => false,
        }
    }
}

/// Search and status filter for the admin order list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub query: String,
    /// `None` means all statuses.
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    #[must_use]
    pub fn new(query: impl Into<String>, status: Option<OrderStatus>) -> Self {
        Self {
            query: query.into(),
            status,
        }
    }

    /// Returns matching orders, newest first. Orders without a creation
    /// date sort last.
    #[must_use]
    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        let needle = self.query.trim().to_lowercase();

        let mut filtered: Vec<&Order> = orders
            .iter()
            .filter(|order| needle.is_empty() || order.matches_query(&needle))
            .filter(|order| self.status.as_ref().is_none_or(|s| &order.status == s))
            .collect();

        filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        filtered
    }

    /// Advances the status filter: all, then each known status, then all.
    pub fn cycle_status(&mut self) {
        self.status = match &self.status {
            None => Some(OrderStatus::ALL[0].clone()),
            Some(current) => OrderStatus::ALL
                .iter()
                .position(|s| s == current)
                .and_then(|idx| OrderStatus::ALL.get(idx + 1))
                .cloned(),
        };
    }

    #[must_use]
    pub fn status_label(&self) -> String {
        self.status
            .as_ref()
            .map_or_else(|| "All Orders".to_string(), OrderStatus::label)
    }
}

/// Number of orders per status.
#[must_use]
pub fn count_by_status(orders: &[Order]) -> BTreeMap<OrderStatus, usize> {
    let mut counts = BTreeMap::new();
    for order in orders {
        *counts.entry(order.status.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order(id: &str, email: &str, status: OrderStatus, day: u32) -> Order {
        Order {
            id: id.to_string(),
            user: Some(OrderCustomer::Profile {
                email: email.to_string(),
                username: None,
            }),
            items: Vec::new(),
            status,
            total: Decimal::ZERO,
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).single(),
        }
    }

    fn sample() -> Vec<Order> {
        vec![
            order("ORD-001", "john@example.com", OrderStatus::Confirmed, 15),
            order("ORD-002", "jane@example.com", OrderStatus::Shipped, 14),
            order("ORD-003", "mike@example.com", OrderStatus::Pending, 13),
        ]
    }

    #[test]
    fn test_status_round_trips_unknown_values() {
        let status: OrderStatus = serde_json::from_str("\"on-hold\"").unwrap();
        assert_eq!(status, OrderStatus::Other("on-hold".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"on-hold\"");
        assert_eq!(OrderStatus::from("Shipped"), OrderStatus::Shipped);
    }

    #[test]
    fn test_status_label_is_capitalized() {
        assert_eq!(OrderStatus::Processing.label(), "Processing");
    }

    #[test]
    fn test_filter_sorts_newest_first() {
        let orders = sample();
        let ids: Vec<&str> = OrderFilter::default()
            .apply(&orders)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["ORD-001", "ORD-002", "ORD-003"]);
    }

    #[test]
    fn test_filter_by_query_and_status() {
        let orders = sample();

        let by_email = OrderFilter::new("JANE", None).apply(&orders);
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id, "ORD-002");

        let by_id = OrderFilter::new("ord-00", Some(OrderStatus::Pending)).apply(&orders);
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].id, "ORD-003");

        assert!(OrderFilter::new("nobody", None).apply(&orders).is_empty());
    }

    #[test]
    fn test_cycle_status_wraps_to_all() {
        let mut filter = OrderFilter::default();
        for _ in 0..OrderStatus::ALL.len() {
            filter.cycle_status();
            assert!(filter.status.is_some());
        }
        filter.cycle_status();
        assert_eq!(filter.status, None);
        assert_eq!(filter.status_label(), "All Orders");
    }

    #[test]
    fn test_deserialize_order_with_string_user() {
        let json = r#"{
            "_id": "o1",
            "user": "65f0c1",
            "items": [{"productId": {"prodName": "Dress", "prodPrice": 45.5}, "quantity": 3}],
            "status": "pending",
            "total": 136.5,
            "createdAt": "2024-01-14T14:20:00Z"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.customer_label(), "65f0c1");
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.items[0].name(), "Dress");
    }

    #[test]
    fn test_count_by_status() {
        let mut orders = sample();
        orders.push(order("ORD-004", "a@b.c", OrderStatus::Pending, 12));

        let counts = count_by_status(&orders);
        assert_eq!(counts.get(&OrderStatus::Pending), Some(&2));
        assert_eq!(counts.get(&OrderStatus::Delivered), None);
    }
}
