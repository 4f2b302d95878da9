//! Typed models for Turbopuffer API payloads.
//!
//! The API leaves several fields optional (`encryption`, `index`,
//! `index.unindexed_bytes`); defaults are applied here, at the boundary,
//! so the rest of the codebase never branches on missing data:
//! missing encryption means SSE, a missing index block means up-to-date,
//! and an up-to-date index always reports zero unindexed bytes.

use serde::{Deserialize, Serialize};

/// A namespace as returned by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamespaceInfo {
    pub id: String,
}

/// Write-index state of a namespace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IndexStatus {
    UpToDate,
    Updating,
}

impl IndexStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            IndexStatus::UpToDate => "up-to-date",
            IndexStatus::Updating => "updating",
        }
    }
}

/// Index block of the metadata payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexInfo {
    pub status: IndexStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unindexed_bytes: Option<u64>,
}

/// Encryption scheme applied to a namespace's storage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EncryptionType {
    /// Server-side encryption (the default).
    Sse,
    /// Customer-managed encryption key.
    Cmek,
}

impl EncryptionType {
    pub fn as_str(self) -> &'static str {
        match self {
            EncryptionType::Sse => "sse",
            EncryptionType::Cmek => "cmek",
        }
    }
}

/// Encryption block of the metadata payload. Present only for
/// CMEK-configured namespaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EncryptionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmek: Option<CmekInfo>,
}

/// Customer-managed key details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CmekInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
}

/// Metadata for one namespace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamespaceMetadata {
    pub approx_row_count: u64,
    pub approx_logical_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<EncryptionInfo>,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl NamespaceMetadata {
    /// Effective encryption type; missing encryption defaults to SSE.
    pub fn encryption_type(&self) -> EncryptionType {
        match &self.encryption {
            Some(enc) if enc.cmek.is_some() => EncryptionType::Cmek,
            _ => EncryptionType::Sse,
        }
    }

    /// Effective index status; a missing index block means up-to-date.
    pub fn index_status(&self) -> IndexStatus {
        self.index
            .as_ref()
            .map(|i| i.status)
            .unwrap_or(IndexStatus::UpToDate)
    }

    /// Unindexed bytes, forced to 0 whenever the index is up-to-date.
    pub fn unindexed_bytes(&self) -> u64 {
        match &self.index {
            Some(i) if i.status == IndexStatus::Updating => i.unindexed_bytes.unwrap_or(0),
            _ => 0,
        }
    }
}

/// Result of a recall estimation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecallResult {
    /// Fraction of true nearest neighbors returned by the approximate
    /// search, in [0, 1].
    pub avg_recall: f64,
    /// Average candidate count from the approximate search.
    pub avg_ann_count: f64,
    /// Average candidate count from the exhaustive search.
    pub avg_exhaustive_count: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_json(body: &str) -> NamespaceMetadata {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn minimal_metadata_defaults() {
        let meta = metadata_json(
            r#"{
                "approx_row_count": 100,
                "approx_logical_bytes": 2048,
                "updated_at": "2025-01-01T00:00:00Z"
            }"#,
        );
        assert_eq!(meta.encryption_type(), EncryptionType::Sse);
        assert_eq!(meta.index_status(), IndexStatus::UpToDate);
        assert_eq!(meta.unindexed_bytes(), 0);
    }

    #[test]
    fn updating_index_reports_unindexed_bytes() {
        let meta = metadata_json(
            r#"{
                "approx_row_count": 5,
                "approx_logical_bytes": 512,
                "index": {"status": "updating", "unindexed_bytes": 256},
                "updated_at": "2025-01-01T00:00:00Z"
            }"#,
        );
        assert_eq!(meta.index_status(), IndexStatus::Updating);
        assert_eq!(meta.unindexed_bytes(), 256);
    }

    #[test]
    fn up_to_date_index_forces_zero_unindexed_bytes() {
        // The upstream value is ignored when the index is up-to-date.
        let meta = metadata_json(
            r#"{
                "approx_row_count": 5,
                "approx_logical_bytes": 512,
                "index": {"status": "up-to-date", "unindexed_bytes": 9999},
                "updated_at": "2025-01-01T00:00:00Z"
            }"#,
        );
        assert_eq!(meta.unindexed_bytes(), 0);
    }

    #[test]
    fn cmek_encryption_detected() {
        let meta = metadata_json(
            r#"{
                "approx_row_count": 1,
                "approx_logical_bytes": 1,
                "encryption": {"cmek": {"key_name": "projects/p/keys/k"}},
                "updated_at": "2025-01-01T00:00:00Z"
            }"#,
        );
        assert_eq!(meta.encryption_type(), EncryptionType::Cmek);
    }

    #[test]
    fn empty_encryption_block_is_sse() {
        let meta = metadata_json(
            r#"{
                "approx_row_count": 1,
                "approx_logical_bytes": 1,
                "encryption": {},
                "updated_at": "2025-01-01T00:00:00Z"
            }"#,
        );
        assert_eq!(meta.encryption_type(), EncryptionType::Sse);
    }

    #[test]
    fn status_strings_match_wire_format() {
        assert_eq!(IndexStatus::UpToDate.as_str(), "up-to-date");
        assert_eq!(IndexStatus::Updating.as_str(), "updating");
        assert_eq!(EncryptionType::Sse.as_str(), "sse");
        assert_eq!(EncryptionType::Cmek.as_str(), "cmek");
    }
}
