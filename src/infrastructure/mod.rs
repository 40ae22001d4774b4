//! Infrastructure layer with external service adapters.

/// Shop REST API client and connectivity diagnostics.
pub mod api;
/// Application configuration.
pub mod config;
/// Client-side fuzzy filtering.
pub mod search;
/// Session storage adapters.
pub mod storage;

pub use api::{ApiClient, ApiDiagnostics, ConnectivityReport, DEFAULT_BASE_URL};
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use search::FuzzySearcher;
pub use storage::KeyringSessionStorage;
