//! Quorum computation errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuorumError {
    /// The block state oracle could not supply the chain height or hash.
    /// Identity-scoped calls fail fast on this; falling back to random
    /// routing would silently weaken the agreement guarantee.
    #[error("block oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("masternode list has {have} entries, quorum needs {need}")]
    InsufficientMembers { have: usize, need: usize },
}
