//! Dual cache: rendered metrics snapshot + recall map.
//!
//! The store is the only shared mutable state in the process. It is
//! created by the composition root and handed out by `Arc`: the refresh
//! cycle is the single writer, the HTTP layer only reads. Metrics
//! replacement swaps an `Arc` under a momentary lock, so a reader never
//! observes a half-written entry and never waits on a fetch.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use tpuff_client::RecallResult;

/// Served before the first cycle completes. Startup performs one fetch
/// before the listener opens, so a real scrape normally never sees it.
pub const PLACEHOLDER: &str = "# Waiting for first scrape...\n";

/// The currently-served rendered output.
#[derive(Debug, Clone)]
pub struct MetricsCacheEntry {
    /// Prometheus exposition text. Never empty.
    pub rendered_text: String,
    /// Timestamp of the last *successful* refresh.
    pub last_update: DateTime<Utc>,
    /// Error from the most recent attempt, if it failed.
    pub last_error: Option<String>,
}

struct RecallState {
    entries: HashMap<(String, String), RecallResult>,
    /// Epoch-initialized so the first cycle always refreshes.
    last_update: DateTime<Utc>,
}

/// Owner of both caches.
pub struct CacheStore {
    metrics: RwLock<Arc<MetricsCacheEntry>>,
    recall: RwLock<RecallState>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self {
            metrics: RwLock::new(Arc::new(MetricsCacheEntry {
                rendered_text: PLACEHOLDER.to_string(),
                last_update: Utc::now(),
                last_error: None,
            })),
            recall: RwLock::new(RecallState {
                entries: HashMap::new(),
                last_update: DateTime::UNIX_EPOCH,
            }),
        }
    }

    /// Atomic snapshot of the current metrics entry.
    pub async fn metrics(&self) -> Arc<MetricsCacheEntry> {
        self.metrics.read().await.clone()
    }

    /// Install a freshly rendered snapshot and clear any error.
    pub async fn replace_metrics(&self, rendered_text: String) {
        let entry = Arc::new(MetricsCacheEntry {
            rendered_text,
            last_update: Utc::now(),
            last_error: None,
        });
        *self.metrics.write().await = entry;
    }

    /// Record a failed cycle: keep the previous text, prepend a comment
    /// naming the error and the last successful update. Stale but
    /// labeled, never empty.
    pub async fn record_failure(&self, error: &str) {
        let mut guard = self.metrics.write().await;
        let prev = guard.clone();
        let rendered_text = format!(
            "# Error refreshing metrics: {error}\n# Last successful update: {}\n\n{}",
            prev.last_update.to_rfc3339(),
            prev.rendered_text
        );
        *guard = Arc::new(MetricsCacheEntry {
            rendered_text,
            last_update: prev.last_update,
            last_error: Some(error.to_string()),
        });
    }

    /// Last good recall value for `(namespace, region)`, if any.
    pub async fn recall(&self, namespace: &str, region: &str) -> Option<RecallResult> {
        let guard = self.recall.read().await;
        guard
            .entries
            .get(&(namespace.to_string(), region.to_string()))
            .cloned()
    }

    /// Replace the whole recall map. Only called on cycles where the
    /// scheduler decided a recall refresh was due.
    pub async fn replace_recall_batch(
        &self,
        entries: HashMap<(String, String), RecallResult>,
        as_of: DateTime<Utc>,
    ) {
        let mut guard = self.recall.write().await;
        guard.entries = entries;
        guard.last_update = as_of;
    }

    /// When the recall map was last refreshed.
    pub async fn recall_last_update(&self) -> DateTime<Utc> {
        self.recall.read().await.last_update
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}
