//! Test fixtures: an in-memory `NamespaceApi` with injectable failures.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tpuff_client::{
    ClientError, ClientResult, IndexInfo, IndexStatus, NamespaceApi, NamespaceInfo,
    NamespaceMetadata, RecallResult,
};

pub(crate) fn metadata(rows: u64, bytes: u64) -> NamespaceMetadata {
    NamespaceMetadata {
        approx_row_count: rows,
        approx_logical_bytes: bytes,
        index: None,
        encryption: None,
        updated_at: "2025-01-01T00:00:00Z".to_string(),
        created_at: None,
    }
}

pub(crate) fn updating_metadata(rows: u64, bytes: u64, unindexed: u64) -> NamespaceMetadata {
    NamespaceMetadata {
        index: Some(IndexInfo {
            status: IndexStatus::Updating,
            unindexed_bytes: Some(unindexed),
        }),
        ..metadata(rows, bytes)
    }
}

pub(crate) fn recall(avg_recall: f64) -> RecallResult {
    RecallResult {
        avg_recall,
        avg_ann_count: 10.0,
        avg_exhaustive_count: 10.0,
    }
}

/// In-memory API. Anything not registered fails: an unknown region fails
/// its listing, a listed-but-unregistered namespace fails its metadata
/// call, a namespace without a recall fixture fails recall estimation.
#[derive(Default)]
pub(crate) struct MockApi {
    regions: HashMap<String, Vec<String>>,
    metadata: HashMap<(String, String), NamespaceMetadata>,
    recall: Mutex<HashMap<(String, String), RecallResult>>,
    pub list_calls: AtomicUsize,
    pub metadata_calls: AtomicUsize,
    pub recall_calls: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, region: &str, id: &str, meta: NamespaceMetadata) -> Self {
        self.regions
            .entry(region.to_string())
            .or_default()
            .push(id.to_string());
        self.metadata
            .insert((region.to_string(), id.to_string()), meta);
        self
    }

    /// Listed in the region, but its metadata call fails.
    pub fn with_broken_namespace(mut self, region: &str, id: &str) -> Self {
        self.regions
            .entry(region.to_string())
            .or_default()
            .push(id.to_string());
        self
    }

    pub fn with_recall(self, region: &str, id: &str, result: RecallResult) -> Self {
        self.set_recall(region, id, result);
        self
    }

    /// Replace a recall fixture after construction (shared-reference
    /// friendly, for cross-cycle tests).
    pub fn set_recall(&self, region: &str, id: &str, result: RecallResult) {
        self.recall
            .lock()
            .unwrap()
            .insert((region.to_string(), id.to_string()), result);
    }

    fn unavailable(what: &str, key: &str) -> ClientError {
        ClientError::Api {
            status: 503,
            message: format!("{what} unavailable: {key}"),
        }
    }
}

impl NamespaceApi for MockApi {
    async fn list_namespaces(&self, region: &str) -> ClientResult<Vec<NamespaceInfo>> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);
        self.regions
            .get(region)
            .map(|ids| {
                ids.iter()
                    .map(|id| NamespaceInfo { id: id.clone() })
                    .collect()
            })
            .ok_or_else(|| Self::unavailable("region", region))
    }

    async fn namespace_metadata(
        &self,
        region: &str,
        namespace: &str,
    ) -> ClientResult<NamespaceMetadata> {
        self.metadata_calls.fetch_add(1, Ordering::Relaxed);
        self.metadata
            .get(&(region.to_string(), namespace.to_string()))
            .cloned()
            .ok_or_else(|| Self::unavailable("metadata", namespace))
    }

    async fn estimate_recall(
        &self,
        region: &str,
        namespace: &str,
        _num: u32,
        _top_k: u32,
    ) -> ClientResult<RecallResult> {
        self.recall_calls.fetch_add(1, Ordering::Relaxed);
        self.recall
            .lock()
            .unwrap()
            .get(&(region.to_string(), namespace.to_string()))
            .cloned()
            .ok_or_else(|| Self::unavailable("recall", namespace))
    }
}
