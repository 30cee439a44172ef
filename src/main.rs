//! Registry Visibility Service
//!
//! Serves the registries each user may see on an environment.

use clap::Parser;
use registry_visibility::{
    AppState,
    config::{LogFormat, load_config},
    orchestrator::KubeClientFactory,
    router,
    store::SnapshotStore,
    transport::{HttpConfig, run_http_blocking},
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Registry Visibility Service - which registries may a user see on an environment
#[derive(Parser, Debug)]
#[command(name = "registry-visibility")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "REGISTRY_VISIBILITY_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error), overrides logging.level
    #[arg(long, env = "REGISTRY_VISIBILITY_LOG_LEVEL")]
    log_level: Option<String>,

    /// HTTP server host, overrides server.host
    #[arg(long, env = "REGISTRY_VISIBILITY_HTTP_HOST")]
    host: Option<String>,

    /// HTTP server port, overrides server.port
    #[arg(long, env = "REGISTRY_VISIBILITY_HTTP_PORT")]
    port: Option<u16>,

    /// Snapshot file with users, endpoints and registries, overrides store.snapshot_path
    #[arg(long, env = "REGISTRY_VISIBILITY_SNAPSHOT")]
    snapshot: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Configuration is loaded before logging so the configured level and format apply
    let config = load_config(args.config.as_deref())?;

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    match config.logging.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting registry visibility service"
    );

    let snapshot_path = args
        .snapshot
        .as_deref()
        .unwrap_or(&config.store.snapshot_path);
    let store = Arc::new(
        SnapshotStore::load(snapshot_path)
            .inspect_err(|e| error!(error = %e, path = snapshot_path, "Failed to load snapshot"))?,
    );

    let clients = Arc::new(KubeClientFactory::new(config.orchestrator.clone()));
    let state = AppState::from_store(store, clients);

    let host = args.host.as_deref().unwrap_or(&config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let http_config = HttpConfig::from_host_port(host, port)?;

    run_http_blocking(router(state), http_config).await
}
