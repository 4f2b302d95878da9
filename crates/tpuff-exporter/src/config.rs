//! Exporter configuration and validation.

use thiserror::Error;

/// Errors raised by configuration validation. All are fatal at startup,
/// before the HTTP listener opens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("port must be between 1 and 65535")]
    InvalidPort,

    #[error("refresh interval must be at least 1 second")]
    InvalidInterval,

    #[error("request timeout must be at least 1 second")]
    InvalidTimeout,

    #[error("recall interval must be at least 1 second")]
    InvalidRecallInterval,

    #[error("a single region and all-regions mode are mutually exclusive")]
    RegionConflict,
}

/// Runtime configuration for the exporter.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// HTTP listen port.
    pub port: u16,
    /// Query one specific region. `None` queries the client's default
    /// region unless `all_regions` is set.
    pub region: Option<String>,
    /// Query every region in the static region table.
    pub all_regions: bool,
    /// Main metrics refresh cadence, seconds.
    pub refresh_interval: u64,
    /// Per-request timeout for outbound API calls, seconds.
    pub request_timeout: u64,
    /// Whether to collect recall estimation metrics at all.
    pub include_recall: bool,
    /// Recall refresh cadence, seconds. Deliberately much longer than
    /// `refresh_interval`: recall estimation issues live queries.
    pub recall_interval: u64,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            port: 9876,
            region: None,
            all_regions: false,
            refresh_interval: 60,
            request_timeout: 30,
            include_recall: false,
            recall_interval: 3600,
        }
    }
}

impl ExporterConfig {
    /// Validate ranges and flag exclusivity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.refresh_interval < 1 {
            return Err(ConfigError::InvalidInterval);
        }
        if self.request_timeout < 1 {
            return Err(ConfigError::InvalidTimeout);
        }
        if self.recall_interval < 1 {
            return Err(ConfigError::InvalidRecallInterval);
        }
        if self.all_regions && self.region.is_some() {
            return Err(ConfigError::RegionConflict);
        }
        Ok(())
    }

    /// Human-readable region mode for logs and the status page.
    pub fn region_mode(&self) -> String {
        if self.all_regions {
            "All regions".to_string()
        } else {
            self.region.clone().unwrap_or_else(|| "Default".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ExporterConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_port_rejected() {
        let config = ExporterConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidPort));
    }

    #[test]
    fn zero_intervals_rejected() {
        let config = ExporterConfig {
            refresh_interval: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidInterval));

        let config = ExporterConfig {
            request_timeout: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTimeout));

        let config = ExporterConfig {
            recall_interval: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidRecallInterval));
    }

    #[test]
    fn region_and_all_regions_conflict() {
        let config = ExporterConfig {
            region: Some("aws-us-east-1".to_string()),
            all_regions: true,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::RegionConflict));
    }

    #[test]
    fn region_mode_strings() {
        let config = ExporterConfig::default();
        assert_eq!(config.region_mode(), "Default");

        let config = ExporterConfig {
            region: Some("gcp-us-west1".to_string()),
            ..Default::default()
        };
        assert_eq!(config.region_mode(), "gcp-us-west1");

        let config = ExporterConfig {
            all_regions: true,
            ..Default::default()
        };
        assert_eq!(config.region_mode(), "All regions");
    }
}
