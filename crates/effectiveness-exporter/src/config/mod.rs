//! Configuration module for the effectiveness exporter

mod api;
mod logging;
mod sources;

pub use api::{ApiConfig, MAX_CHUNK_SIZE};
pub use logging::{LogFormat, LogLevel};
pub use sources::SourcesConfig;

use crate::error::ConfigurationError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

/// Configuration file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "effectiveness-exporter.toml";

/// Prefix for structured environment overrides (`__` separates nesting)
pub const ENV_PREFIX: &str = "EFFECTIVENESS_EXPORTER_";

/// Unprefixed variables kept for compatibility with existing deployments
const LEGACY_ENV_VARS: [&str; 3] = ["LOGLEVEL", "POLLING_INTERVAL_SECONDS", "EXPORTER_PORT"];

/// Main configuration structure for the exporter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log verbosity: DEBUG, INFO, WARNING, ERROR or CRITICAL
    pub log_level: String,

    /// Log output format: text or json
    pub log_format: String,

    /// Seconds to wait between two poll cycles
    pub polling_interval_seconds: u64,

    /// Port of the Prometheus scrape endpoint
    pub exporter_port: u16,

    /// IP address the scrape endpoint binds to (IPv4 or IPv6)
    pub exporter_host: String,

    /// Beacon explorer API settings
    pub api: ApiConfig,

    /// Validator input files
    pub sources: SourcesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
            log_format: "text".to_string(),
            polling_interval_seconds: 600,
            exporter_port: 9877,
            exporter_host: "0.0.0.0".to_string(),
            api: ApiConfig::default(),
            sources: SourcesConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional TOML file and the environment
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let file = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigurationError::ParseError {
                        details: format!("configuration file not found: {}", path.display()),
                    });
                }
                Toml::file(path)
            }
            None => Toml::file(DEFAULT_CONFIG_FILE),
        };

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(file)
            .merge(
                Env::raw()
                    .only(&LEGACY_ENV_VARS)
                    .map(|key| match key.as_str().to_ascii_uppercase().as_str() {
                        "LOGLEVEL" => "log_level".into(),
                        other => other.to_ascii_lowercase().into(),
                    }),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract().map_err(|e| ConfigurationError::ParseError {
            details: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Generate example configuration file
    pub fn generate_example() -> Result<String, ConfigurationError> {
        toml::to_string_pretty(&Self::default()).map_err(|e| ConfigurationError::ParseError {
            details: format!("Failed to serialize config: {e}"),
        })
    }

    /// Validate every field; any failure is fatal at startup
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.log_level()?;
        self.log_format()?;

        if self.polling_interval_seconds == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "polling_interval_seconds".to_string(),
                value: self.polling_interval_seconds.to_string(),
                reason: "Polling interval must be greater than 0".to_string(),
            });
        }

        self.metrics_address()?;
        self.api.validate()
    }

    /// Parsed log level
    pub fn log_level(&self) -> Result<LogLevel, ConfigurationError> {
        self.log_level.parse()
    }

    /// Parsed log format
    pub fn log_format(&self) -> Result<LogFormat, ConfigurationError> {
        self.log_format.parse()
    }

    /// Get polling interval as Duration
    pub fn polling_interval(&self) -> Duration {
        Duration::from_secs(self.polling_interval_seconds)
    }

    /// Socket address of the scrape endpoint
    pub fn metrics_address(&self) -> Result<SocketAddr, ConfigurationError> {
        let host: IpAddr = self
            .exporter_host
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigurationError::InvalidValue {
                key: "exporter_host".to_string(),
                value: self.exporter_host.clone(),
                reason: e.to_string(),
            })?;
        Ok(SocketAddr::new(host, self.exporter_port))
    }
}
