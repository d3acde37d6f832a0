//! Fault-tolerant effectiveness fetching

use super::{BeaconApi, EffectivenessRecord};
use crate::metrics::ExporterMetrics;
use crate::validators::ValidatorId;
use std::sync::Arc;
use tracing::{debug, error};

/// Fetches one chunk of effectiveness records, never failing
///
/// Any error is logged and counted, and the chunk yields no records. The next
/// poll cycle is the retry.
#[derive(Clone)]
pub struct EffectivenessFetcher {
    api: Arc<dyn BeaconApi>,
}

impl EffectivenessFetcher {
    pub fn new(api: Arc<dyn BeaconApi>) -> Self {
        Self { api }
    }

    pub async fn fetch(&self, validators: &[ValidatorId]) -> Vec<EffectivenessRecord> {
        match self.api.attestation_effectiveness(validators).await {
            Ok(records) => {
                debug!(
                    "Fetched {} effectiveness records for {} validators",
                    records.len(),
                    validators.len()
                );
                records
            }
            Err(e) => {
                error!(
                    error_code = e.error_code(),
                    retryable = e.is_retryable(),
                    "Failed to fetch validators effectiveness: {} - Validators: {:?}",
                    e,
                    validators.iter().map(ValidatorId::as_str).collect::<Vec<_>>()
                );
                ExporterMetrics::record_chunk_failure(&e);
                Vec::new()
            }
        }
    }
}
