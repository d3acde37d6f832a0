//! Error types for the effectiveness exporter
//!
//! Startup failures (configuration, validator resolution) are fatal and bubble
//! up to `main`. Failures while polling are recoverable: the fetcher converts
//! them into an empty result and the loop carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Configuration parsing failed
    #[error("Failed to parse configuration: {details}")]
    ParseError { details: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for {key}: {value} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Main error type for the exporter
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigurationError),

    /// HTTP client error (connect failure, timeout, body read)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Response body was not the JSON we expected
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input file exists but could not be read or decoded
    #[error("Cannot load validator source {}: {details}", path.display())]
    SourceFile { path: PathBuf, details: String },

    /// Deposit address lookup failed during startup resolution
    #[error("Deposit address lookup failed for {address}: {message}")]
    DepositLookup { address: String, message: String },

    /// Response parsed but carried no `data` field (usually rate limiting)
    #[error("Response does not contain `data`: {body}")]
    MissingPayload { body: String },

    /// Non-success status with a body that is not an API envelope
    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Neither source yielded a validator
    #[error("Validators list is empty (no validators file or deposit addresses file)")]
    EmptyValidatorSet,

    /// Prometheus exporter could not be installed
    #[error("Metrics exporter error: {message}")]
    MetricsExporter { message: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config(_) => "EXPORTER_CONFIG_ERROR",
            Error::HttpClient(e) if e.is_timeout() => "EXPORTER_TIMEOUT",
            Error::HttpClient(_) => "EXPORTER_HTTP_CLIENT_ERROR",
            Error::Serialization(_) => "EXPORTER_SERIALIZATION_ERROR",
            Error::SourceFile { .. } => "EXPORTER_SOURCE_FILE_ERROR",
            Error::DepositLookup { .. } => "EXPORTER_DEPOSIT_LOOKUP_ERROR",
            Error::MissingPayload { .. } => "EXPORTER_MISSING_PAYLOAD",
            Error::UnexpectedStatus { .. } => "EXPORTER_UNEXPECTED_STATUS",
            Error::EmptyValidatorSet => "EXPORTER_EMPTY_VALIDATOR_SET",
            Error::MetricsExporter { .. } => "EXPORTER_METRICS_ERROR",
        }
    }

    /// Check if the next poll may succeed where this one failed
    ///
    /// A 4xx other than 429 means the explorer rejected the request itself
    /// (bad identifier, wrong path), so repeating it unchanged will not help.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::HttpClient(_) | Error::Serialization(_) | Error::MissingPayload { .. } => true,
            Error::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
