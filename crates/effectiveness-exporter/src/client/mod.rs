//! Beacon explorer API access

mod beacon;
mod fetcher;
mod types;

pub use beacon::BeaconChainClient;
pub use fetcher::EffectivenessFetcher;
pub use types::{ApiResponse, DepositedValidator, EffectivenessRecord, OneOrMany};

use crate::error::Result;
use crate::validators::{DepositAddress, ValidatorId};
use async_trait::async_trait;

/// Operations the exporter needs from the beacon explorer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BeaconApi: Send + Sync {
    /// Validators created from an eth1 deposit address
    async fn validators_by_deposit_address(
        &self,
        address: &DepositAddress,
    ) -> Result<Vec<DepositedValidator>>;

    /// Attestation effectiveness for up to one batch of validators
    async fn attestation_effectiveness(
        &self,
        validators: &[ValidatorId],
    ) -> Result<Vec<EffectivenessRecord>>;
}
