//! Exporter self-metrics and the Prometheus scrape listener

use super::{
    CHUNK_FAILURES_TOTAL, ERROR_LABEL, POLL_CYCLES_TOTAL, POLL_CYCLE_DURATION_SECONDS,
    RETRYABLE_LABEL, VALIDATORS, VALIDATOR_EFFECTIVENESS,
};
use crate::error::{Error, Result};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;

/// Health of the exporter itself
pub struct ExporterMetrics;

impl ExporterMetrics {
    /// Register metric descriptions with the installed recorder
    pub fn describe() {
        describe_gauge!(VALIDATOR_EFFECTIVENESS, "Validator effectiveness");
        describe_counter!(POLL_CYCLES_TOTAL, "Total number of completed poll cycles");
        describe_counter!(
            CHUNK_FAILURES_TOTAL,
            "Effectiveness requests that produced no data, by error code and retryability"
        );
        describe_histogram!(
            POLL_CYCLE_DURATION_SECONDS,
            "Duration of a full poll cycle over every chunk"
        );
        describe_gauge!(VALIDATORS, "Number of validators being polled");
    }

    pub fn set_validator_count(count: usize) {
        gauge!(VALIDATORS).set(count as f64);
    }

    pub fn record_chunk_failure(error: &Error) {
        let retryable = if error.is_retryable() { "true" } else { "false" };
        counter!(
            CHUNK_FAILURES_TOTAL,
            ERROR_LABEL => error.error_code(),
            RETRYABLE_LABEL => retryable
        )
        .increment(1);
    }

    pub fn record_cycle(duration: Duration) {
        counter!(POLL_CYCLES_TOTAL).increment(1);
        histogram!(POLL_CYCLE_DURATION_SECONDS).record(duration.as_secs_f64());
    }
}

/// Install the global recorder and serve `/metrics` on `address`
///
/// Must be called from within a tokio runtime.
pub fn install_prometheus_exporter(address: SocketAddr) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(address)
        .install()
        .map_err(|e| Error::MetricsExporter {
            message: e.to_string(),
        })?;

    ExporterMetrics::describe();

    info!("Metrics server started on http://{}/metrics", address);
    Ok(())
}
