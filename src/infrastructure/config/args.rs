use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "kapee",
    version,
    about = "A terminal storefront and admin console",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// REST API base URL.
    #[arg(long, value_name = "URL", env = "KAPEE_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub request_timeout: Option<u64>,

    /// Restore the session saved by the last login.
    #[arg(long)]
    pub restore_session: bool,

    /// Probe the API endpoints, print a report and exit.
    #[arg(long)]
    pub check_api: bool,

    /// Router path to open at startup, e.g. `/shopping` or `/product/<id>`.
    #[arg(long, value_name = "PATH")]
    pub open: Option<String>,

    /// Enable mouse support.
    #[arg(long)]
    pub mouse: Option<bool>,

    /// Number of suggested products on the cart screen.
    #[arg(long, value_name = "N")]
    pub related_items: Option<usize>,

    /// Prefix for rendered prices.
    #[arg(long, value_name = "SYMBOL")]
    pub currency_symbol: Option<String>,

    /// Enable `TachyonFX` animations.
    #[arg(long)]
    pub enable_animations: Option<bool>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,
}
