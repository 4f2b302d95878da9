//! The `tpuff export` command — runs the Prometheus exporter.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use tpuff_exporter::{CacheStore, ExporterConfig, ExporterError, Refresher, build_router};

/// How long to wait for the listener to close after a shutdown signal
/// before forcing exit.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

pub async fn run(config: ExporterConfig) -> anyhow::Result<()> {
    config.validate()?;

    let client = crate::client::build(Duration::from_secs(config.request_timeout))?;
    let cache = Arc::new(CacheStore::new());
    let refresher = Refresher::new(client, config.clone(), cache.clone());

    // One full cycle before the listener opens, so /metrics never serves
    // the placeholder to a real scrape under normal startup.
    info!("performing initial metrics fetch");
    refresher.refresh_once().await;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresh_handle = tokio::spawn(async move {
        refresher.run(shutdown_rx).await;
    });

    let router = build_router(cache, config.clone());
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(port = config.port, error = %e, "failed to bind HTTP listener");
            return Err(ExporterError::Bind {
                port: config.port,
                source: e,
            }
            .into());
        }
    };

    info!(%addr, "Turbopuffer Prometheus exporter running");
    info!(interval_secs = config.refresh_interval, region_mode = %config.region_mode(), "refresh configuration");
    if config.include_recall {
        info!(
            recall_interval_secs = config.recall_interval,
            "recall estimation enabled (runs queries, incurs costs)"
        );
    }

    let (signal_tx, mut signal_rx) = watch::channel(false);
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        shutdown_signal().await;
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
        let _ = signal_tx.send(true);
    });

    tokio::select! {
        result = server => result?,
        _ = async {
            signal_rx.changed().await.ok();
            tokio::time::sleep(SHUTDOWN_GRACE).await;
        } => {
            warn!("listener did not close within the grace period, forcing exit");
            std::process::exit(1);
        }
    }

    let _ = refresh_handle.await;
    info!("exporter stopped");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
