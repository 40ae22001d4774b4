//! Use case implementations.

mod admin_use_case;
mod cart_use_case;
mod catalog_use_case;
mod login_use_case;
mod password_reset_use_case;
mod profile_use_case;
mod register_use_case;
mod restore_session_use_case;

pub use admin_use_case::{AdminUseCase, parse_form, summarize};
pub use cart_use_case::{CartUseCase, DEFAULT_RELATED_ITEMS};
pub use catalog_use_case::CatalogUseCase;
pub use login_use_case::{LOGIN_FAILED, LoginUseCase};
pub use password_reset_use_case::PasswordResetUseCase;
pub use profile_use_case::ProfileUseCase;
pub use register_use_case::RegisterUseCase;
pub use restore_session_use_case::RestoreSessionUseCase;
