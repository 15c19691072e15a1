//! Typed wrappers over the raw `call` surface.
//!
//! Each wrapper is a mechanical pass-through: build params, dispatch under
//! the right routing, decode the result. Anything with real logic belongs
//! in the dispatch/quorum/discovery layers, not here.

use serde::Deserialize;

use dmesh_dispatch::{Routing, RpcTransport};
use dmesh_types::{BlockHash, SubjectId};

use crate::client::DmeshClient;
use crate::error::ClientError;

/// One unspent output as reported by `getUTXO`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Utxo {
    pub txid: String,
    pub output_index: u32,
    pub satoshis: u64,
    pub address: String,
}

impl<T: RpcTransport + Clone> DmeshClient<T> {
    /// Height of the current best chain tip.
    pub async fn best_block_height(&self) -> Result<u64, ClientError> {
        let value = self
            .call("getBestBlockHeight", serde_json::json!({}), Routing::Random)
            .await?;
        value
            .as_u64()
            .ok_or_else(|| ClientError::InvalidResponse("height is not an unsigned integer".into()))
    }

    /// Hash of the block at `height`.
    pub async fn block_hash(&self, height: u64) -> Result<BlockHash, ClientError> {
        let value = self
            .call(
                "getBlockHash",
                serde_json::json!({ "height": height }),
                Routing::Random,
            )
            .await?;
        let text = value
            .as_str()
            .ok_or_else(|| ClientError::InvalidResponse("block hash is not a string".into()))?;
        BlockHash::from_hex(text)
            .map_err(|e| ClientError::InvalidResponse(format!("malformed block hash: {e}")))
    }

    /// Confirmed balance of `address` in base units.
    pub async fn address_balance(&self, address: &str) -> Result<u64, ClientError> {
        let value = self
            .call(
                "getBalance",
                serde_json::json!({ "address": address }),
                Routing::Random,
            )
            .await?;
        value
            .as_u64()
            .ok_or_else(|| ClientError::InvalidResponse("balance is not an unsigned integer".into()))
    }

    /// Unspent outputs of `address`.
    pub async fn utxos(&self, address: &str) -> Result<Vec<Utxo>, ClientError> {
        let value = self
            .call(
                "getUTXO",
                serde_json::json!({ "address": address }),
                Routing::Random,
            )
            .await?;
        serde_json::from_value(value)
            .map_err(|e| ClientError::InvalidResponse(format!("undecodable utxo set: {e}")))
    }

    /// Broadcast a raw serialized transaction; returns its txid.
    pub async fn broadcast_transaction(&self, raw_hex: &str) -> Result<String, ClientError> {
        let value = self
            .call(
                "sendRawTransaction",
                serde_json::json!({ "rawTransaction": raw_hex }),
                Routing::Random,
            )
            .await?;
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| ClientError::InvalidResponse("txid is not a string".into()))
    }

    /// State of an identity, answered by its own quorum. The payload schema
    /// is application-level; it is returned undecoded.
    pub async fn user_state(&self, subject: &SubjectId) -> Result<serde_json::Value, ClientError> {
        self.call(
            "getUserState",
            serde_json::json!({ "userId": subject.to_string() }),
            Routing::QuorumOf(*subject),
        )
        .await
    }
}
