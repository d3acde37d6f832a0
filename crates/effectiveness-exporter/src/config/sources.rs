//! Validator source configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where validator identities come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// JSON array of validator indices and/or public keys
    pub validators_file: PathBuf,

    /// JSON array of eth1 deposit addresses, resolved through the explorer
    pub deposit_addresses_file: PathBuf,

    /// Log and skip a deposit address whose lookup fails instead of aborting startup
    pub skip_failed_deposit_lookups: bool,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            validators_file: PathBuf::from("validators.json"),
            deposit_addresses_file: PathBuf::from("validator_deposit_addresses.json"),
            skip_failed_deposit_lookups: false,
        }
    }
}
