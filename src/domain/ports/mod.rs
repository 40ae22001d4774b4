mod admin_port;
mod auth_port;
mod session_storage_port;
mod storefront_port;

pub use admin_port::{AdminPort, ProductForm};
pub use auth_port::{AuthPort, Credentials, PasswordReset, Registration};
pub use session_storage_port::SessionStoragePort;
pub use storefront_port::StorefrontPort;

#[cfg(test)]
pub mod mocks {
    pub use super::admin_port::MockAdminPort;
    pub use super::auth_port::mock::MockAuthPort;
    pub use super::session_storage_port::mock::MockSessionStorage;
    pub use super::storefront_port::MockStorefrontPort;
}
