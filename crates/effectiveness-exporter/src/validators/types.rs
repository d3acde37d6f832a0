//! Validator identity types
//!
//! - `ValidatorId`: validator index or hex public key, passed through verbatim
//! - `DepositAddress`: eth1 address used only to discover validators
//! - `ValidatorSet`: deduplicated, immutable set built once at startup

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Validator index or public key
///
/// The format is opaque here: whatever the input file holds is sent to the
/// explorer and used as a label unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorId(String);

impl ValidatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ValidatorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ValidatorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Eth1 deposit address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepositAddress(String);

impl DepositAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DepositAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DepositAddress {
    fn from(address: String) -> Self {
        Self(address)
    }
}

/// Set of validators polled for the lifetime of the process
///
/// Stored sorted so chunk boundaries are the same every cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorSet {
    ids: Vec<ValidatorId>,
}

impl ValidatorSet {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &ValidatorId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidatorId> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[ValidatorId] {
        &self.ids
    }
}

impl From<BTreeSet<ValidatorId>> for ValidatorSet {
    fn from(ids: BTreeSet<ValidatorId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }
}

impl FromIterator<ValidatorId> for ValidatorSet {
    fn from_iter<I: IntoIterator<Item = ValidatorId>>(iter: I) -> Self {
        iter.into_iter().collect::<BTreeSet<_>>().into()
    }
}

impl<'a> IntoIterator for &'a ValidatorSet {
    type Item = &'a ValidatorId;
    type IntoIter = std::slice::Iter<'a, ValidatorId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
