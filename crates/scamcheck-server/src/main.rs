//! ScamCheck Server
//!
//! Thin HTTP surface over the ScamCheck analysis core: one endpoint that
//! takes a pasted message and returns a structured scam-risk verdict.
//!
//! The server validates input bounds and applies per-caller rate limiting;
//! all classification logic lives in `scamcheck-classifiers`.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

mod config;
mod rate_limit;
mod routes;
mod state;

use config::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "scamcheck-server")]
#[command(about = "ScamCheck message analysis server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Listen address
    #[arg(short = 'l', long)]
    listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long)]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting ScamCheck server");

    // Load configuration
    let config = ServerConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!(
        "Rate limit: {} requests per {}s window",
        config.rate_limit.max_requests, config.rate_limit.window_secs
    );

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Initialize application state (build analyzer from the environment)
    let state = state::AppState::new(config.clone(), metrics_handle)?;
    if state.analyzer.has_remote() {
        info!("Remote classifier configured, heuristics on standby");
    } else {
        info!("No remote credential found, running heuristic-only");
    }

    // Build and run the server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.listen, config.port).parse()?;
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("scamcheck=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scamcheck=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "scamcheck_requests_total",
        "Total number of analysis requests received"
    );
    metrics::describe_counter!(
        "scamcheck_verdicts_total",
        "Total number of verdicts produced, by risk level"
    );
    metrics::describe_counter!(
        "scamcheck_rate_limited_total",
        "Total number of requests rejected by rate limiting"
    );
    metrics::describe_histogram!(
        "scamcheck_analyze_latency_us",
        metrics::Unit::Microseconds,
        "Analysis latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
