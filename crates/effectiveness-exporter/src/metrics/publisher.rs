//! Maps effectiveness records onto labeled gauges

use super::{GaugeKey, GaugeState, PUBKEY_LABEL, VALIDATOR_EFFECTIVENESS, VALIDATOR_INDEX_LABEL};
use crate::client::EffectivenessRecord;
use metrics::gauge;
use tracing::info;

/// Writes validator effectiveness gauges
#[derive(Debug, Clone)]
pub struct MetricsPublisher {
    state: GaugeState,
}

impl MetricsPublisher {
    pub fn new(state: GaugeState) -> Self {
        Self { state }
    }

    /// Read view of everything published so far
    pub fn state(&self) -> &GaugeState {
        &self.state
    }

    /// Set the gauge for the record's label pair; the value is trusted as-is
    pub fn publish(&self, record: &EffectivenessRecord) {
        info!("Validator effectiveness {:?}", record);

        gauge!(
            VALIDATOR_EFFECTIVENESS,
            PUBKEY_LABEL => record.pubkey.to_string(),
            VALIDATOR_INDEX_LABEL => record.validator_index.clone()
        )
        .set(record.attestation_effectiveness);

        self.state.set(
            GaugeKey::new(record.pubkey.as_str(), record.validator_index.as_str()),
            record.attestation_effectiveness,
        );
    }
}
