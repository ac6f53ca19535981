//! Weather-atlas: read-only climate averages API.
//!
//! Single-binary Tokio application that:
//! 1. Loads the country → city → month dataset once
//! 2. Regenerates `.well-known/openapi.json`
//! 3. Serves progressive lookups over HTTP

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use atlas_api::{build_router, openapi, AppState};
use climate_data::{Dataset, LookupService};
use common::ServiceConfig;

/// Climate averages lookup service
#[derive(Parser)]
#[command(name = "weather-atlas", about = "Country → city → month climate averages API")]
struct Cli {
    /// TOML config file (defaults to ./config.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Load and validate the dataset, log its summary, then exit.
    #[arg(long)]
    check_data: bool,

    /// Print the OpenAPI document to stdout and exit.
    #[arg(long)]
    print_openapi: bool,
}

fn load_dataset(cfg: &ServiceConfig) -> common::Result<Dataset> {
    match &cfg.data_path {
        Some(path) => Dataset::from_path(path),
        None => {
            info!("No data_path configured, using bundled dataset");
            Dataset::bundled()
        }
    }
}

/// Pretty-printed OpenAPI document for `--print-openapi`.
fn render_openapi() -> common::Result<String> {
    Ok(serde_json::to_string_pretty(&openapi::document())?)
}

/// One-line dataset report for startup and `--check-data`.
fn data_report(lookup: &LookupService) -> String {
    let summary = lookup.summary();
    format!(
        "{} countries, {} cities, {} months: {}",
        summary.countries,
        summary.cities,
        summary.months,
        lookup.list_countries().join(", ")
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "weather_atlas=info,climate_data=info,atlas_api=info,tower_http=info".into()
            }),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    if cli.print_openapi {
        match render_openapi() {
            Ok(doc) => println!("{doc}"),
            Err(e) => {
                error!("Failed to render OpenAPI document: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    info!("🌍 Weather Atlas starting up...");

    // Load configuration.
    let cfg = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Load the dataset once; it is shared read-only from here on.
    let dataset = match load_dataset(&cfg) {
        Ok(d) => d,
        Err(e) => {
            error!("Dataset error: {}", e);
            std::process::exit(1);
        }
    };
    let lookup = LookupService::new(Arc::new(dataset));

    info!("Dataset: {}", data_report(&lookup));

    if cli.check_data {
        info!("Dataset OK");
        return;
    }

    if cfg.write_openapi {
        if let Err(e) = openapi::write_document(&cfg.well_known_dir) {
            warn!("Could not write OpenAPI document: {}", e);
        }
    }

    let app = build_router(AppState::new(lookup), &cfg.well_known_dir);

    let listener = match TcpListener::bind(&cfg.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", cfg.bind_addr, e);
            std::process::exit(1);
        }
    };
    info!("Listening on {}", cfg.bind_addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Weather Atlas stopped");
}
