//! # Validator Effectiveness Exporter
//!
//! Polls a beacon-chain explorer for the attestation effectiveness of a fixed
//! set of validators and republishes the scores as Prometheus gauges.
//!
//! ## Pipeline
//!
//! - **Resolution**: validator indices/public keys from `validators.json`, plus
//!   the validators created by each address in `validator_deposit_addresses.json`
//! - **Chunking**: batches of at most 100, the explorer's request ceiling
//! - **Fetching**: one GET per batch; failures cost that batch one cycle
//! - **Publishing**: `validator_effectiveness{pubkey, validator_index}` gauges
//!   that keep their last value until overwritten

pub mod chunk;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod poll;
pub mod telemetry;
pub mod validators;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use poll::PollLoop;

/// Version of the exporter crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
