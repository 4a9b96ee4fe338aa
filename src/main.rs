//! Secure echo endpoint server.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌───────────────────────────────────────────────────────────┐
//!                  │                       SECURE ECHO                          │
//!                  │                                                            │
//!  GET ?a=1&b=2    │  ┌─────────┐   ┌───────────┐   ┌──────────┐   ┌─────────┐  │
//!  ────────────────┼─▶│  http   │──▶│  params   │──▶│ response │──▶│  size   │  │
//!                  │  │ server  │   │ validate  │   │ envelope │   │ budget  │  │
//!                  │  └─────────┘   │ sanitize  │   └──────────┘   └────┬────┘  │
//!                  │                └─────┬─────┘                      │       │
//!                  │                      │ 400                        │ 500   │
//!  JSON envelope   │                      ▼                            ▼       │
//!  ◀───────────────┼──────────────── error envelope ◀─────────── security    │
//!                  │                                               headers     │
//!                  │  ┌──────────────────────────────────────────────────────┐ │
//!                  │  │ config (ArcSwap snapshot, file watcher) │ logging    │ │
//!                  │  │ lifecycle (signals, shutdown)           │ metrics    │ │
//!                  │  └──────────────────────────────────────────────────────┘ │
//!                  └───────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use secure_echo::config::{load_config, watcher::ConfigWatcher, ServiceConfig};
use secure_echo::observability::{logging, metrics};
use secure_echo::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "secure-echo")]
#[command(about = "Validating, sanitizing JSON echo endpoint", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload the configuration file when it changes.
    #[arg(long, requires = "config")]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    let log_filter = logging::init_logging(&config);
    tracing::info!("secure-echo v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        servlet_path = %config.endpoint.servlet_path,
        max_response_size = config.endpoint.max_response_size,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Keep the watcher alive for the lifetime of the server.
    let (_watcher, config_updates) = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path, config.clone());
            (Some(watcher.run()?), updates)
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).with_log_filter(log_filter);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
