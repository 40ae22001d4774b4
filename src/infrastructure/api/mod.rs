//! Shop REST API adapter.

mod client;
pub mod diagnostics;
mod dto;
mod endpoints;

pub use client::{ApiClient, DEFAULT_TIMEOUT, error_from_body, image_mime};
pub use diagnostics::{ApiDiagnostics, ConnectivityReport};
pub use endpoints::{DEFAULT_BASE_URL, Endpoints};
