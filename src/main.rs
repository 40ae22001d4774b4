use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use kapee::infrastructure::{
    ApiClient, ApiDiagnostics, AppConfig, CliArgs, KeyringSessionStorage, StorageManager,
};
use kapee::domain::Route;
use kapee::presentation::App;

struct Startup {
    config: AppConfig,
    check_api: bool,
    open: Option<String>,
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<Startup> {
    let args = CliArgs::parse();
    let check_api = args.check_api;
    let open = args.open.clone();

    let mut config = StorageManager::new()?.load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    Ok(Startup {
        config,
        check_api,
        open,
    })
}

fn start_route(path: Option<&str>) -> Route {
    let Some(path) = path else {
        return Route::Home;
    };
    Route::from_path(path).unwrap_or_else(|| {
        warn!(path, "Unknown start route, opening home");
        Route::Home
    })
}

async fn check_api(client: &ApiClient) -> ExitCode {
    let diagnostics = ApiDiagnostics::new(client.http().clone(), client.endpoints().clone());
    let report = diagnostics.check_connectivity().await;
    println!("{report}");

    if report.is_reachable() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;

    let Startup {
        config,
        check_api: check_only,
        open,
    } = load_config()?;
    init_logging(&config)?;

    info!(version = kapee::VERSION, api = %config.api_base_url, "Starting Kapee");

    let client = Arc::new(ApiClient::new(&config.api_base_url, config.request_timeout())?);

    if check_only {
        return Ok(check_api(&client).await);
    }

    let storage = Arc::new(KeyringSessionStorage::new());
    let app = App::new(client.clone(), client.clone(), client, storage, config)
        .with_start_route(start_route(open.as_deref()));

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal).await;
    ratatui::restore();

    result.map(|()| ExitCode::SUCCESS)
}
