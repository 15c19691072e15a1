//! The block state oracle boundary.

use std::future::Future;

use dmesh_types::BlockHash;

use crate::error::QuorumError;

/// Source of chain state used to anchor quorum computations.
///
/// Consumed, never implemented, by this crate. The production implementation
/// queries the network; tests supply a deterministic double. Both operations
/// are transient; callers treat [`QuorumError::OracleUnavailable`] as
/// retryable at their own discretion.
pub trait BlockOracle: Send + Sync {
    /// Height of the current best chain tip.
    fn best_height(&self) -> impl Future<Output = Result<u64, QuorumError>> + Send;

    /// Hash of the block at `height`.
    fn block_hash(&self, height: u64) -> impl Future<Output = Result<BlockHash, QuorumError>> + Send;
}
