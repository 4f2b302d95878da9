//! tpuff-client — the slice of the Turbopuffer API that tpuff consumes.
//!
//! Provides the static region table, typed models for the namespace
//! listing/metadata/recall payloads, and a reqwest-backed client with
//! per-request timeouts.
//!
//! # Architecture
//!
//! ```text
//! NamespaceApi (trait)
//!   ├── list_namespaces(region)
//!   ├── namespace_metadata(region, id)
//!   └── estimate_recall(region, id, num, top_k)
//!
//! TpuffClient (reqwest)
//!   └── https://{region}.turbopuffer.com, bearer auth
//! ```
//!
//! Each call may fail independently; callers decide whether a failure is
//! fatal or degradable. The exporter core is generic over `NamespaceApi`
//! so it can be tested without a network.

pub mod error;
pub mod http;
pub mod regions;
pub mod types;

pub use error::{ClientError, ClientResult};
pub use http::TpuffClient;
pub use types::*;

use std::future::Future;

/// The namespace operations consumed by the tpuff tools.
///
/// Implementations must be shareable across tasks; the returned futures
/// must be `Send` so callers can fan out concurrently.
pub trait NamespaceApi: Send + Sync {
    /// List the namespaces in a region.
    fn list_namespaces(
        &self,
        region: &str,
    ) -> impl Future<Output = ClientResult<Vec<NamespaceInfo>>> + Send;

    /// Fetch the metadata for one namespace.
    fn namespace_metadata(
        &self,
        region: &str,
        namespace: &str,
    ) -> impl Future<Output = ClientResult<NamespaceMetadata>> + Send;

    /// Estimate recall for one namespace by sampling `num` probe queries
    /// at `top_k` results each. Issues live queries and incurs costs.
    fn estimate_recall(
        &self,
        region: &str,
        namespace: &str,
        num: u32,
        top_k: u32,
    ) -> impl Future<Output = ClientResult<RecallResult>> + Send;
}

impl<T: NamespaceApi> NamespaceApi for &T {
    fn list_namespaces(
        &self,
        region: &str,
    ) -> impl Future<Output = ClientResult<Vec<NamespaceInfo>>> + Send {
        (**self).list_namespaces(region)
    }

    fn namespace_metadata(
        &self,
        region: &str,
        namespace: &str,
    ) -> impl Future<Output = ClientResult<NamespaceMetadata>> + Send {
        (**self).namespace_metadata(region, namespace)
    }

    fn estimate_recall(
        &self,
        region: &str,
        namespace: &str,
        num: u32,
        top_k: u32,
    ) -> impl Future<Output = ClientResult<RecallResult>> + Send {
        (**self).estimate_recall(region, namespace, num, top_k)
    }
}
