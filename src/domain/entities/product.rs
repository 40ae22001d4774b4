//! Catalog product.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::serde_utils;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Product as returned by `/api/products/*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(rename = "prodName")]
    pub name: String,
    #[serde(rename = "prodDesc", default)]
    pub description: Option<String>,
    #[serde(rename = "prodPrice")]
    pub price: Decimal,
    #[serde(rename = "prodQty", default, deserialize_with = "serde_utils::count")]
    pub quantity: i64,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            quantity: 0,
            image: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image.trim().is_empty()
    }
}

/// Formats an amount with two decimals and the given currency symbol.
#[must_use]
pub fn format_price(amount: Decimal, symbol: &str) -> String {
    format!("{symbol}{:.2}", amount.round_dp(2))
}
