//! Discovery errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A seed could not be fetched from or its response was unparseable.
    #[error("masternode list fetch from {seed} failed: {reason}")]
    Fetch { seed: String, reason: String },

    /// A seed answered but yielded no usable masternodes. The previous
    /// snapshot, if any, is kept untouched.
    #[error("seed {seed} returned no usable masternodes")]
    EmptySet { seed: String },

    /// Every configured bootstrap seed failed; carries the last failure.
    #[error("all {attempted} bootstrap seeds failed, last: {last}")]
    AllSeedsFailed { attempted: usize, last: String },

    #[error("no bootstrap seeds configured")]
    NoSeeds,

    /// The registry has never been successfully populated.
    #[error("masternode registry has never been populated")]
    EmptyRegistry,
}
