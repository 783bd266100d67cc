//! realmap-server: serves the realmap HTTP API from a JSON dataset.

use anyhow::{Context, Result};
use clap::Parser;
use realmap_core::config::{DEFAULT_HOST, DEFAULT_PORT, ENV_DATA, ENV_HOST, ENV_PORT};
use realmap_core::GeoStore;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "realmap-server")]
#[command(about = "HTTP API for the realmap viewer")]
struct Args {
    /// Host to bind to
    #[arg(long, env = ENV_HOST, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, env = ENV_PORT, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Dataset to serve (defaults to the bundled one)
    #[arg(long, env = ENV_DATA)]
    data: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|level| EnvFilter::try_new(level).ok())
            .unwrap_or_else(|| EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    info!("Starting realmap server");

    let store = match &args.data {
        Some(path) => GeoStore::load_from_path(path)
            .with_context(|| format!("loading dataset {}", path.display()))?,
        None => GeoStore::load().context("loading bundled dataset")?,
    };
    let stats = store.stats();
    info!(
        regions = stats.regions,
        locations = stats.locations,
        landmarks = stats.landmarks,
        "dataset ready"
    );

    realmap_server::run_server(store, &args.host, args.port).await
}
