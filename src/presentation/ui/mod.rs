//! UI screens.

mod about_screen;
pub(crate) mod admin;
mod app;
mod auth_panel;
mod cart_screen;
mod catalog_screen;
mod category_screen;
mod login_screen;
mod password_reset_screen;
mod product_screen;
mod profile_screen;
mod register_screen;
pub(crate) mod request;
mod splash_screen;
pub(crate) mod utils;
pub(crate) mod view;

pub use app::App;
pub use request::{Outcome, Request, UseCases};
pub use view::{KeyResult, View};
