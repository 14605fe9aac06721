//! Server entry point for charfetch.

use anyhow::{Context, Result};
use charfetch_core::{AppState, Pipeline, RemoteClient, build_router};
use clap::Parser;
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let config = args.service_config();
    config.validate()?;

    if let Some(dir) = &config.output_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let client = RemoteClient::new_with_timeouts(config.connect_timeout_secs, config.read_timeout_secs)
        .context("failed to build HTTP client")?;

    info!(
        concurrency = config.concurrency,
        chunk_size = config.chunk_size,
        offset_mode = %config.offset_mode,
        request_timeout_secs = config.request_timeout.as_secs(),
        "charfetch starting"
    );

    let app = build_router(AppState::new(Pipeline::new(client, config)));

    let addr = args.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("charfetch stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
