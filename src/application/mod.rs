//! Application layer with use cases, DTOs and the session context.

/// Data transfer objects.
pub mod dto;
/// Action failures.
pub mod error;
/// Shared session state.
pub mod session;
/// Use case implementations.
pub mod use_cases;

pub use error::ActionError;
pub use session::SessionContext;
pub use use_cases::{
    AdminUseCase, CartUseCase, CatalogUseCase, LoginUseCase, PasswordResetUseCase,
    ProfileUseCase, RegisterUseCase, RestoreSessionUseCase,
};
