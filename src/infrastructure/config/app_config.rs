//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;
use crate::infrastructure::api::DEFAULT_BASE_URL;

pub(crate) const APP_NAME: &str = "kapee";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "kapee";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Settings read from `config.toml`, with CLI flags layered on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    #[serde(default)]
    pub log_level: LogLevel,

    /// REST API base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Load the session stored by a previous run at startup.
    #[serde(default)]
    pub restore_session: bool,

    /// Enable mouse support.
    #[serde(default = "default_true")]
    pub mouse: bool,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How many products the cart screen suggests below the cart.
    #[serde(default = "default_related_items")]
    pub related_items: usize,

    /// Prefix used when rendering prices.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Enable `TachyonFX` animations.
    #[serde(default = "default_true")]
    pub enable_animations: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            related_items: default_related_items(),
            currency_symbol: default_currency_symbol(),
            enable_animations: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_related_items() -> usize {
    4
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_accent_color() -> String {
    "#f97316".to_string()
}

const fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = args.api_url {
            self.api_base_url = api_url;
        }
        if let Some(timeout) = args.request_timeout {
            self.request_timeout_secs = timeout;
        }
        if args.restore_session {
            self.restore_session = true;
        }
        if let Some(mouse) = args.mouse {
            self.mouse = mouse;
        }
        if let Some(related) = args.related_items {
            self.ui.related_items = related;
        }
        if let Some(symbol) = args.currency_symbol {
            self.ui.currency_symbol = symbol;
        }
        if let Some(enable_animations) = args.enable_animations {
            self.ui.enable_animations = enable_animations;
        }
        if let Some(accent_color) = args.accent_color {
            self.theme.accent_color = accent_color;
        }
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join(format!("{APP_NAME}.log")))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            restore_session: false,
            mouse: true,
            ui: UiConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}
