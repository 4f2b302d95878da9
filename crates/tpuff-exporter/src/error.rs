//! Exporter error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Fatal exporter errors. Everything below this level degrades to
/// serving stale-but-labeled data instead of failing.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
