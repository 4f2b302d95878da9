//! tpuff-exporter — Prometheus exporter engine for Turbopuffer namespaces.
//!
//! A long-running process that polls the Turbopuffer API across one or
//! many regions on a fixed cadence, keeps serving the last good snapshot
//! through partial and total fetch failure, and exposes the result over
//! HTTP in Prometheus text exposition format.
//!
//! # Architecture
//!
//! ```text
//! Refresher (timer loop, at most one cycle in flight)
//!   ├── fetch::fetch_namespaces() → Vec<NamespaceSnapshot>
//!   │     regions sequential, namespaces-within-region concurrent
//!   ├── recall-due decision (independent, longer cadence)
//!   ├── prometheus::render() → exposition text
//!   └── CacheStore::replace_metrics() — atomic swap
//!
//! CacheStore
//!   ├── metrics snapshot (stale-but-labeled on failure)
//!   └── recall map keyed by (namespace, region)
//!
//! server (axum)
//!   ├── GET /metrics — cache text, always 200
//!   ├── GET /health  — last attempt outcome, always 200
//!   └── GET /       — status page
//! ```
//!
//! The HTTP layer only ever reads the cache; it never fetches.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod prometheus;
pub mod refresh;
pub mod server;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod testutil;

pub use cache::{CacheStore, MetricsCacheEntry};
pub use config::{ConfigError, ExporterConfig};
pub use error::ExporterError;
pub use fetch::{FetchError, FetchPlan, fetch_namespaces};
pub use refresh::Refresher;
pub use server::build_router;
pub use snapshot::NamespaceSnapshot;
