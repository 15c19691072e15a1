//! The candidate-selection capability injected into the dispatcher.

use std::future::Future;

use thiserror::Error;

use dmesh_types::MasternodeEntry;

use crate::routing::Routing;

/// Errors from candidate selection, surfaced verbatim to the caller.
///
/// An oracle or registry failure here fails the whole call; quorum routing
/// never degrades to random routing on selection failure.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("registry unavailable: {0}")]
    Registry(String),

    #[error("quorum computation failed: {0}")]
    Quorum(String),
}

/// Supplies the ordered candidate list for one logical call.
///
/// Injected into the dispatcher so tests substitute deterministic doubles;
/// there is no process-global selection function to patch. For `Random`
/// routing the order is a fresh uniform shuffle; for `QuorumOf` it is the
/// quorum's deterministic preference order.
pub trait NodeSelector: Send + Sync {
    fn candidates(
        &self,
        routing: &Routing,
    ) -> impl Future<Output = Result<Vec<MasternodeEntry>, SelectError>> + Send;
}
