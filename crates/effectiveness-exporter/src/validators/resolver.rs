//! Builds the validator set from the identifiers file and the deposit addresses file

use super::{DepositAddress, ValidatorId, ValidatorSet};
use crate::client::BeaconApi;
use crate::config::SourcesConfig;
use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Resolves the validator set once at startup
pub struct ValidatorSetResolver {
    sources: SourcesConfig,
    api: Arc<dyn BeaconApi>,
}

impl ValidatorSetResolver {
    pub fn new(sources: SourcesConfig, api: Arc<dyn BeaconApi>) -> Self {
        Self { sources, api }
    }

    /// Union of both sources
    ///
    /// Fails with `Error::EmptyValidatorSet` when nothing was found; the caller
    /// must not start polling in that case.
    pub async fn resolve(&self) -> Result<ValidatorSet> {
        let mut validators = BTreeSet::new();

        let ids_file = &self.sources.validators_file;
        match read_string_list(ids_file).await? {
            Some(ids) => {
                info!("Validators list of indexes/pubkeys: {:?}", ids);
                validators.extend(ids.into_iter().map(ValidatorId::from));
            }
            None => info!(
                "Not reading {} as it does not exist",
                ids_file.display()
            ),
        }

        let addresses_file = &self.sources.deposit_addresses_file;
        match read_string_list(addresses_file).await? {
            Some(addresses) => {
                info!("Deposit addresses: {:?}", addresses);
                for address in addresses.into_iter().map(DepositAddress::from) {
                    self.resolve_deposit_address(&address, &mut validators)
                        .await?;
                }
            }
            None => info!(
                "Not reading {} as it does not exist",
                addresses_file.display()
            ),
        }

        if validators.is_empty() {
            error!(
                "Validators list is empty (no {} or {} file)",
                ids_file.display(),
                addresses_file.display()
            );
            return Err(Error::EmptyValidatorSet);
        }

        info!("Resolved {} validators", validators.len());
        Ok(ValidatorSet::from(validators))
    }

    async fn resolve_deposit_address(
        &self,
        address: &DepositAddress,
        validators: &mut BTreeSet<ValidatorId>,
    ) -> Result<()> {
        debug!("Looking up validators for deposit address {}", address);

        match self.api.validators_by_deposit_address(address).await {
            Ok(deposited) => {
                if deposited.is_empty() {
                    warn!("Deposit address {} controls no validators", address);
                }
                for validator in deposited {
                    info!("Validator public key {}", validator.public_key);
                    validators.insert(validator.public_key);
                }
                Ok(())
            }
            Err(e) if self.sources.skip_failed_deposit_lookups => {
                warn!("Skipping deposit address {}: {}", address, e);
                Ok(())
            }
            Err(e) => Err(Error::DepositLookup {
                address: address.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// Read a JSON array of strings; `None` when the file does not exist
async fn read_string_list(path: &Path) -> Result<Option<Vec<String>>> {
    if !path.exists() {
        return Ok(None);
    }

    info!("Reading {} file...", path.display());
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::SourceFile {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| Error::SourceFile {
            path: path.to_path_buf(),
            details: format!("expected a JSON array of strings: {e}"),
        })
}
