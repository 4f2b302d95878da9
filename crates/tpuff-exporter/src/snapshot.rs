//! Namespace snapshots — one collection's observed state at fetch time.

use tpuff_client::{EncryptionType, IndexStatus, NamespaceMetadata, RecallResult};

/// Point-in-time state of one namespace, as observed by a fetch cycle.
///
/// `(id, region)` is the natural key: the same namespace id may exist in
/// several regions. Snapshots are created fresh every cycle and never
/// mutated in place; a new generation replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceSnapshot {
    pub id: String,
    /// Region the namespace was observed in. Empty when querying the
    /// default region without an explicit region configured.
    pub region: String,
    pub approx_row_count: u64,
    pub approx_logical_bytes: u64,
    pub index_status: IndexStatus,
    /// Always 0 when `index_status` is up-to-date.
    pub unindexed_bytes: u64,
    pub encryption: EncryptionType,
    /// RFC 3339 timestamp as received from the API.
    pub updated_at: String,
    pub recall: Option<RecallResult>,
}

impl NamespaceSnapshot {
    /// Build a snapshot from a metadata payload, applying the boundary
    /// defaults (missing encryption is SSE, up-to-date means zero
    /// unindexed bytes).
    pub fn from_metadata(
        id: &str,
        region: &str,
        metadata: &NamespaceMetadata,
        recall: Option<RecallResult>,
    ) -> Self {
        Self {
            id: id.to_string(),
            region: region.to_string(),
            approx_row_count: metadata.approx_row_count,
            approx_logical_bytes: metadata.approx_logical_bytes,
            index_status: metadata.index_status(),
            unindexed_bytes: metadata.unindexed_bytes(),
            encryption: metadata.encryption_type(),
            updated_at: metadata.updated_at.clone(),
            recall,
        }
    }

    /// The label set shared by every per-namespace metric family.
    ///
    /// An unknown region (default single-region mode) is labeled
    /// `unknown`, matching what operators see from the hosted exporter.
    pub fn labels(&self) -> Vec<(String, String)> {
        let region = if self.region.is_empty() {
            "unknown"
        } else {
            self.region.as_str()
        };
        vec![
            ("namespace".to_string(), self.id.clone()),
            ("region".to_string(), region.to_string()),
            ("encryption".to_string(), self.encryption.as_str().to_string()),
            (
                "index_status".to_string(),
                self.index_status.as_str().to_string(),
            ),
        ]
    }

    /// Cache key for the recall map.
    pub fn recall_key(&self) -> (String, String) {
        (self.id.clone(), self.region.clone())
    }
}
