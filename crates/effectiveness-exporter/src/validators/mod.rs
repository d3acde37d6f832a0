//! Validator identities and startup resolution

mod resolver;
mod types;

pub use resolver::ValidatorSetResolver;
pub use types::{DepositAddress, ValidatorId, ValidatorSet};
