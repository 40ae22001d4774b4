//! Terminal color theme.

mod service;

pub use service::Theme;
