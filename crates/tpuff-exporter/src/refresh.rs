//! Refresh scheduler — the timer-driven fetch+encode loop.
//!
//! At most one cycle is in flight at any time, enforced by an atomic
//! guard: a tick that fires while a cycle is still running is skipped,
//! not queued. A failed cycle never erases the last-good snapshot; it
//! degrades the cache to stale-but-labeled.
//!
//! The recall sub-fetch runs on its own, much longer cadence. On cycles
//! where recall is not due, last-good recall values are merged back into
//! the fresh snapshots, keyed by `(namespace, region)`.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use tpuff_client::NamespaceApi;

use crate::cache::CacheStore;
use crate::config::ExporterConfig;
use crate::fetch::{FetchError, FetchPlan, fetch_namespaces};
use crate::prometheus::{namespace_families, render, simple_gauge};

/// Drives the fetch+encode cycle.
pub struct Refresher<C> {
    client: C,
    config: ExporterConfig,
    cache: Arc<CacheStore>,
    in_flight: AtomicBool,
}

impl<C: NamespaceApi> Refresher<C> {
    pub fn new(client: C, config: ExporterConfig, cache: Arc<CacheStore>) -> Self {
        Self {
            client,
            config,
            cache,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Fixed-interval refresh loop. Runs until the shutdown signal.
    ///
    /// The caller performs one `refresh_once` before starting this loop
    /// (and before the HTTP listener opens), so the placeholder is never
    /// served to a real scrape under normal startup.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_secs = self.config.refresh_interval,
            "refresh loop started"
        );
        let interval = std::time::Duration::from_secs(self.config.refresh_interval);
        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    self.refresh_once().await;
                }
                _ = shutdown.changed() => {
                    info!("refresh loop shutting down");
                    break;
                }
            }
        }
    }

    /// Run one refresh cycle. Returns `false` if another cycle was still
    /// in flight and this tick was skipped.
    pub async fn refresh_once(&self) -> bool {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            warn!("previous refresh cycle still in flight, skipping tick");
            return false;
        }

        if let Err(e) = self.run_cycle().await {
            error!(error = %e, "metrics refresh failed");
            self.cache.record_failure(&e.to_string()).await;
        }

        self.in_flight.store(false, Ordering::Release);
        true
    }

    async fn run_cycle(&self) -> Result<(), FetchError> {
        let start = Instant::now();
        let refresh_recall = self.config.include_recall && self.recall_due().await;
        if refresh_recall {
            debug!(
                recall_interval_secs = self.config.recall_interval,
                "recall refresh due this cycle"
            );
        }

        let plan = FetchPlan {
            region: self.config.region.clone(),
            all_regions: self.config.all_regions,
            include_recall: refresh_recall,
        };
        let mut snapshots = fetch_namespaces(&self.client, &plan).await?;

        if refresh_recall {
            let entries: HashMap<_, _> = snapshots
                .iter()
                .filter_map(|s| s.recall.clone().map(|r| (s.recall_key(), r)))
                .collect();
            debug!(cached = entries.len(), "recall cache refreshed");
            self.cache.replace_recall_batch(entries, Utc::now()).await;
        } else if self.config.include_recall {
            // Merge last-good recall values into this cycle's snapshots.
            for snap in &mut snapshots {
                if snap.recall.is_none() {
                    snap.recall = self.cache.recall(&snap.id, &snap.region).await;
                }
            }
        }

        let mut families = namespace_families(&snapshots);
        let duration = start.elapsed().as_secs_f64();
        families.push(simple_gauge(
            "turbopuffer_exporter_scrape_duration_seconds",
            "Time taken to fetch metrics from the Turbopuffer API",
            duration,
        ));
        families.push(simple_gauge(
            "turbopuffer_exporter_last_scrape_timestamp_seconds",
            "Unix timestamp of the last successful scrape",
            Utc::now().timestamp() as f64,
        ));

        self.cache.replace_metrics(render(&families)).await;
        debug!(
            namespaces = snapshots.len(),
            duration_secs = duration,
            refreshed_recall = refresh_recall,
            "metrics refresh completed"
        );
        Ok(())
    }

    async fn recall_due(&self) -> bool {
        let last = self.cache.recall_last_update().await;
        (Utc::now() - last).num_seconds() >= self.config.recall_interval as i64
    }
}
