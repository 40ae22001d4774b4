//! Domain layer with core business entities, rules and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Admin route guard.
pub mod guard;
/// Routes and navigation history.
pub mod navigation;
/// Status banners.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;
/// Form and password checks.
pub mod validation;

pub use entities::{AuthToken, User};
pub use errors::{ApiError, AuthError, ValidationError};
pub use guard::{AdminGuard, GuardDecision};
pub use navigation::{AdminRoute, Navigator, Route};
pub use ports::{AdminPort, AuthPort, SessionStoragePort, StorefrontPort};
