//! The network boundary for list acquisition.

use std::future::Future;
use std::sync::Arc;

use dmesh_types::{MasternodeList, NodeAddress};

use crate::error::DiscoveryError;

/// Fetches the current masternode list from one seed node.
///
/// The production implementation issues an RPC call over the client's
/// transport; tests swap in a scripted double. Keeping this boundary a trait
/// means the registry never touches the network directly.
pub trait MasternodeListSource: Send + Sync {
    fn fetch_list(
        &self,
        seed: &NodeAddress,
    ) -> impl Future<Output = Result<MasternodeList, DiscoveryError>> + Send;
}

impl<S: MasternodeListSource> MasternodeListSource for Arc<S> {
    fn fetch_list(
        &self,
        seed: &NodeAddress,
    ) -> impl Future<Output = Result<MasternodeList, DiscoveryError>> + Send {
        (**self).fetch_list(seed)
    }
}
