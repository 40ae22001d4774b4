//! Shopping cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::serde_utils;

use super::{Product, ProductId};

/// A cart line with its populated product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "productId")]
    pub product: Product,
    #[serde(deserialize_with = "serde_utils::quantity")]
    pub quantity: u32,
}

impl CartItem {
    #[must_use]
    pub const fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Saturates at `Decimal::MAX` instead of overflowing.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Quantity the decrement control should request, or `None` when the
    /// line must be removed instead.
    #[must_use]
    pub const fn decremented_quantity(&self) -> Option<u32> {
        if self.quantity > 1 {
            Some(self.quantity - 1)
        } else {
            None
        }
    }
}

/// The user's cart as last returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub const fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Sum of `price * quantity` over every line.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |count: u32, item| count.saturating_add(item.quantity))
    }

    #[must_use]
    pub fn find(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product.id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: Decimal, quantity: u32) -> CartItem {
        CartItem::new(Product::new(id, id, price), quantity)
    }

    #[test]
    fn test_total_is_sum_of_price_times_quantity() {
        let cart = Cart::new(vec![
            item("a", Decimal::new(123_675, 2), 1),
            item("b", Decimal::new(8999, 2), 2),
            item("c", Decimal::new(4550, 2), 3),
        ]);

        assert_eq!(cart.total(), Decimal::new(155_323, 2));
        assert_eq!(cart.unit_count(), 6);
    }

    #[test]
    fn test_absurd_prices_saturate() {
        let cart = Cart::new(vec![
            CartItem::new(Product::new("a", "Yacht", Decimal::MAX), u32::MAX),
            CartItem::new(Product::new("b", "Moon", Decimal::MAX), 2),
        ]);

        assert_eq!(cart.items[0].line_total(), Decimal::MAX);
        assert_eq!(cart.total(), Decimal::MAX);
        assert_eq!(cart.unit_count(), u32::MAX);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_decrement_removes_last_unit() {
        assert_eq!(item("a", Decimal::ONE, 3).decremented_quantity(), Some(2));
        assert_eq!(item("a", Decimal::ONE, 1).decremented_quantity(), None);
    }

    #[test]
    fn test_deserialize_populated_items() {
        let json = r#"{"items": [
            {"productId": {"_id": "p1", "prodName": "Sneakers", "prodPrice": 125}, "quantity": 2}
        ]}"#;

        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.total(), Decimal::new(250, 0));
        assert!(cart.find(&ProductId::from("p1")).is_some());
    }
}
