//! Domain entity definitions.

mod cart;
mod category;
mod order;
mod product;
mod token;
mod user;

pub use cart::{Cart, CartItem};
pub use category::{Category, SIDEBAR_CATEGORIES, merge_with_sidebar};
pub use order::{
    Order, OrderCustomer, OrderFilter, OrderItem, OrderProduct, OrderStatus, count_by_status,
};
pub use product::{Product, ProductId, format_price};
pub use token::AuthToken;
pub use user::{User, UserId, UserRole};
