//! CLI command implementations
//!
//! `serve` boots the full HTTP API: load config, apply environment
//! overrides, build the shared state, optionally seed the roster, bind.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::http::{AppState, HttpServer};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Command::Serve { config, seed } => serve(&config, seed),
    }
}

/// Boot the HTTP server
pub fn serve(config_path: &Path, seed: bool) -> CliResult<()> {
    init_tracing();

    // A missing config file is not an error; defaults give a working
    // development setup. A present-but-broken file is fatal.
    let mut config = if config_path.exists() {
        AppConfig::load(config_path)?
    } else {
        tracing::info!("No config file at {}, using defaults", config_path.display());
        AppConfig::default()
    };
    config.apply_env();

    let state = Arc::new(AppState::new(&config));

    state
        .pictures
        .ensure_root()
        .map_err(|e| CliError::Boot(format!("Failed to create uploads directory: {}", e)))?;

    if seed {
        let count = state
            .roster
            .seed_samples()
            .map_err(|e| CliError::Boot(format!("Seeding failed: {}", e)))?;
        tracing::info!("Seeded {} sample students", count);
    }

    let server = HttpServer::with_state(config, state);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(server.start())
        .map_err(|e| CliError::Boot(e.to_string()))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("campusd=info,tower_http=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
