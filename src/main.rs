//! Faucet service.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http (axum) ──▶ FaucetRegistry ──▶ Faucet ──▶ SimpleTxManager ──▶ RPC
//!                 │                                  │
//!                 └── admin (enable/disable)         └── metrics (Prometheus)
//!
//!   faucet.toml ──▶ config (load, validate, watch) ──▶ registry.apply_config
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use faucet_service::config::{load_config, ConfigWatcher};
use faucet_service::lifecycle::{wait_for_signal, Shutdown};
use faucet_service::observability::{self, Metricer, NoopMetrics, PrometheusMetrics};
use faucet_service::{FaucetRegistry, HttpServer};

#[derive(Parser)]
#[command(name = "faucet-service")]
#[command(about = "Funds addresses on EVM chains", long_about = None)]
struct Args {
    /// Path to the TOML configuration.
    #[arg(short, long, default_value = "faucet.toml")]
    config: PathBuf,

    /// Reload faucet enable/disable flags when the config file changes.
    #[arg(long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(&args.config)?;
    observability::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.server.bind_address,
        faucets = config.faucets.len(),
        "Configuration loaded"
    );

    let metrics: Arc<dyn Metricer> = if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        observability::init_metrics(addr)?;
        Arc::new(PrometheusMetrics)
    } else {
        Arc::new(NoopMetrics)
    };

    let registry = FaucetRegistry::from_config(&config, metrics).await?;
    let shutdown = Shutdown::new();

    // Dropping the watcher stops it, so keep it for the lifetime of main.
    let _watcher = if args.watch {
        let (watcher, mut updates) = ConfigWatcher::new(&args.config);
        let watcher = watcher.run()?;
        let registry = registry.clone();
        let mut stop = shutdown.subscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    Some(new_config) = updates.recv() => registry.apply_config(&new_config).await,
                    _ = stop.recv() => break,
                    else => break,
                }
            }
        });
        Some(watcher)
    } else {
        None
    };

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let server = HttpServer::new(&config, registry.clone());
    let server_shutdown = shutdown.subscribe();
    let server_task = tokio::spawn(server.run(listener, server_shutdown));

    wait_for_signal().await;
    shutdown.trigger();

    if let Err(e) = server_task.await? {
        tracing::error!(error = %e, "HTTP server exited with error");
    }
    registry.close_all().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
