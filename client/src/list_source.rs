//! Masternode list acquisition over the RPC transport.

use serde::Deserialize;

use dmesh_discovery::{DiscoveryError, MasternodeListSource};
use dmesh_dispatch::RpcTransport;
use dmesh_types::{MasternodeEntry, MasternodeList, MasternodeStatus, NodeAddress, NodeId};

/// The RPC method a seed answers with its view of the masternode set.
const LIST_METHOD: &str = "getMNList";

/// Fetches the masternode list by calling [`LIST_METHOD`] on a seed node.
pub struct RpcListSource<T> {
    transport: T,
}

/// Wire shape of one masternode in a `getMNList` response.
#[derive(Debug, Deserialize)]
struct WireMasternode {
    id: String,
    host: String,
    port: u16,
    status: MasternodeStatus,
}

/// Wire shape of a `getMNList` response.
#[derive(Debug, Deserialize)]
struct WireMasternodeList {
    height: u64,
    masternodes: Vec<WireMasternode>,
}

impl<T> RpcListSource<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

fn decode_list(value: serde_json::Value) -> Result<MasternodeList, String> {
    let wire: WireMasternodeList =
        serde_json::from_value(value).map_err(|e| format!("undecodable list payload: {e}"))?;

    let mut entries = Vec::with_capacity(wire.masternodes.len());
    for mn in wire.masternodes {
        let id = NodeId::from_hex(&mn.id).map_err(|e| format!("bad node id {:?}: {e}", mn.id))?;
        entries.push(MasternodeEntry::new(
            NodeAddress::new(mn.host, mn.port),
            id,
            mn.status,
        ));
    }
    Ok(MasternodeList::new(entries, wire.height))
}

impl<T: RpcTransport> MasternodeListSource for RpcListSource<T> {
    async fn fetch_list(&self, seed: &NodeAddress) -> Result<MasternodeList, DiscoveryError> {
        let value = self
            .transport
            .request(seed, LIST_METHOD, &serde_json::json!({}))
            .await
            .map_err(|e| DiscoveryError::Fetch {
                seed: seed.to_string(),
                reason: e.to_string(),
            })?;

        decode_list(value).map_err(|reason| DiscoveryError::Fetch {
            seed: seed.to_string(),
            reason,
        })
    }
}
