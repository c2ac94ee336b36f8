//! Guestbook Node - serves the guestbook API.

use anyhow::Context;
use clap::Parser;
use guestbook_node::api::{create_router, AppState};
use guestbook_node::config::NodeConfig;
use guestbook_node::observability::{init_logging, LogFormat};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Guestbook Node - guestbook API over a hosted or in-memory store
#[derive(Parser, Debug)]
#[command(name = "guestbook-node")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML, TOML, or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API listen address
    #[arg(long)]
    api_addr: Option<SocketAddr>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, json)
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = NodeConfig::load(args.config.as_deref()).context("invalid configuration")?;
    if let Some(addr) = args.api_addr {
        config.api_addr = addr;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if let Some(format) = args.log_format.as_deref() {
        config.log_format = LogFormat::parse(format);
    }

    init_logging(&config.log_level, config.log_format);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting guestbook node");

    let store = config
        .store
        .build()
        .context("failed to initialize entry store")?;

    tracing::info!(
        api_addr = %config.api_addr,
        backend = %store.backend(),
        "Node configuration"
    );

    let app = create_router(AppState::from_shared(store));
    let listener = tokio::net::TcpListener::bind(config.api_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.api_addr))?;

    tracing::info!("Node is ready. Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Guestbook node stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
