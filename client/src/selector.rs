//! Production candidate selection over the registry and quorum selector.

use std::sync::Arc;

use rand::seq::SliceRandom;

use dmesh_discovery::{MasternodeListSource, MasternodeRegistry};
use dmesh_dispatch::{NodeSelector, Routing, SelectError};
use dmesh_quorum::{BlockOracle, QuorumSelector};
use dmesh_types::MasternodeEntry;

/// Uniformly shuffled snapshot: the first pick is uniform random, and
/// retries draw the remaining nodes without replacement.
fn shuffled_candidates<S: MasternodeListSource>(
    registry: &MasternodeRegistry<S>,
) -> Result<Vec<MasternodeEntry>, SelectError> {
    let list = registry
        .get_list()
        .map_err(|e| SelectError::Registry(e.to_string()))?;
    let mut entries = list.entries().to_vec();
    entries.shuffle(&mut rand::rng());
    Ok(entries)
}

/// Selector for `Random` routing only.
///
/// This is what the block oracle's own dispatcher uses: chain state reads
/// go to any node, and quorum routing through it would be circular.
pub struct RandomSelector<S> {
    registry: Arc<MasternodeRegistry<S>>,
}

impl<S> RandomSelector<S> {
    pub fn new(registry: Arc<MasternodeRegistry<S>>) -> Self {
        Self { registry }
    }
}

impl<S: MasternodeListSource> NodeSelector for RandomSelector<S> {
    async fn candidates(&self, routing: &Routing) -> Result<Vec<MasternodeEntry>, SelectError> {
        match routing {
            Routing::Random => shuffled_candidates(&self.registry),
            Routing::QuorumOf(_) => Err(SelectError::Quorum(
                "identity routing is not available on the oracle path".into(),
            )),
        }
    }
}

/// The full production selector: random reads from the registry snapshot,
/// identity-scoped calls through the deterministic quorum.
pub struct RegistrySelector<S, O> {
    registry: Arc<MasternodeRegistry<S>>,
    quorum: Arc<QuorumSelector<O>>,
}

impl<S, O> RegistrySelector<S, O> {
    pub fn new(registry: Arc<MasternodeRegistry<S>>, quorum: Arc<QuorumSelector<O>>) -> Self {
        Self { registry, quorum }
    }
}

impl<S: MasternodeListSource, O: BlockOracle> NodeSelector for RegistrySelector<S, O> {
    async fn candidates(&self, routing: &Routing) -> Result<Vec<MasternodeEntry>, SelectError> {
        match routing {
            Routing::Random => shuffled_candidates(&self.registry),
            Routing::QuorumOf(subject) => {
                let list = self
                    .registry
                    .get_list()
                    .map_err(|e| SelectError::Registry(e.to_string()))?;
                let descriptor = self
                    .quorum
                    .compute_quorum(&list, subject)
                    .await
                    .map_err(|e| SelectError::Quorum(e.to_string()))?;
                Ok(descriptor.members)
            }
        }
    }
}
