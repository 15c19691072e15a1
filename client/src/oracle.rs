//! Block state oracle backed by the network itself.
//!
//! The chain height and block hashes come from the same masternode network
//! the client is routing over: any node can answer them, so the oracle
//! dispatches with `Random` routing through its own dispatcher. The quorum
//! selector only ever sees the [`BlockOracle`] trait.

use dmesh_discovery::MasternodeListSource;
use dmesh_dispatch::{Dispatcher, Routing, RpcTransport};
use dmesh_quorum::{BlockOracle, QuorumError};
use dmesh_types::BlockHash;

use crate::selector::RandomSelector;

/// [`BlockOracle`] implementation that queries random masternodes.
pub struct RpcBlockOracle<T, S> {
    dispatcher: Dispatcher<T, RandomSelector<S>>,
}

impl<T, S> RpcBlockOracle<T, S> {
    pub fn new(dispatcher: Dispatcher<T, RandomSelector<S>>) -> Self {
        Self { dispatcher }
    }
}

impl<T: RpcTransport, S: MasternodeListSource> BlockOracle for RpcBlockOracle<T, S> {
    async fn best_height(&self) -> Result<u64, QuorumError> {
        let value = self
            .dispatcher
            .call("getBestBlockHeight", serde_json::json!({}), Routing::Random)
            .await
            .map_err(|e| QuorumError::OracleUnavailable(e.to_string()))?;
        value
            .as_u64()
            .ok_or_else(|| QuorumError::OracleUnavailable("height is not an unsigned integer".into()))
    }

    async fn block_hash(&self, height: u64) -> Result<BlockHash, QuorumError> {
        let value = self
            .dispatcher
            .call(
                "getBlockHash",
                serde_json::json!({ "height": height }),
                Routing::Random,
            )
            .await
            .map_err(|e| QuorumError::OracleUnavailable(e.to_string()))?;
        let text = value
            .as_str()
            .ok_or_else(|| QuorumError::OracleUnavailable("block hash is not a string".into()))?;
        BlockHash::from_hex(text)
            .map_err(|e| QuorumError::OracleUnavailable(format!("malformed block hash: {e}")))
    }
}
