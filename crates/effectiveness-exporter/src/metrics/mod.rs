//! Prometheus metrics
//!
//! `MetricsPublisher` is the only writer of validator gauges. It mirrors every
//! value into `GaugeState`, which callers can read at any time.

mod exporter;
mod gauge_state;
mod publisher;

pub use exporter::{install_prometheus_exporter, ExporterMetrics};
pub use gauge_state::{GaugeKey, GaugeState};
pub use publisher::MetricsPublisher;

/// Gauge holding the last observed attestation effectiveness per validator
pub const VALIDATOR_EFFECTIVENESS: &str = "validator_effectiveness";

/// Public key label
pub const PUBKEY_LABEL: &str = "pubkey";

/// Validator index label
pub const VALIDATOR_INDEX_LABEL: &str = "validator_index";

/// Error code label on failure counters
pub const ERROR_LABEL: &str = "error";

/// Whether the next cycle may succeed where this one failed
pub const RETRYABLE_LABEL: &str = "retryable";

pub const POLL_CYCLES_TOTAL: &str = "effectiveness_exporter_poll_cycles_total";
pub const CHUNK_FAILURES_TOTAL: &str = "effectiveness_exporter_chunk_failures_total";
pub const POLL_CYCLE_DURATION_SECONDS: &str = "effectiveness_exporter_poll_cycle_duration_seconds";
pub const VALIDATORS: &str = "effectiveness_exporter_validators";
