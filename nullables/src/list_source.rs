//! Nullable list source — programmable masternode list fetches.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use dmesh_discovery::{DiscoveryError, MasternodeListSource};
use dmesh_types::{MasternodeList, NodeAddress};

/// A [`MasternodeListSource`] that serves scripted lists.
///
/// Queued outcomes are consumed first (in order, `None` meaning a fetch
/// failure); once drained, the fixed fallback list answers every fetch.
/// Fetches are counted for single-flight and TTL assertions.
pub struct NullListSource {
    queued: Mutex<VecOutcomes>,
    fallback: Option<MasternodeList>,
    fetches: AtomicUsize,
}

type VecOutcomes = Vec<Option<MasternodeList>>;

impl NullListSource {
    /// Answer every fetch with the same list.
    pub fn fixed(list: MasternodeList) -> Self {
        Self {
            queued: Mutex::new(Vec::new()),
            fallback: Some(list),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Consume `outcomes` front to back, then fail every further fetch.
    pub fn scripted(outcomes: Vec<Option<MasternodeList>>) -> Self {
        let mut reversed = outcomes;
        reversed.reverse();
        Self {
            queued: Mutex::new(reversed),
            fallback: None,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Total number of fetches served.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl MasternodeListSource for NullListSource {
    async fn fetch_list(&self, seed: &NodeAddress) -> Result<MasternodeList, DiscoveryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let queued = self.queued.lock().unwrap().pop();
        let outcome = match queued {
            Some(outcome) => outcome,
            None => self.fallback.clone(),
        };

        outcome.ok_or_else(|| DiscoveryError::Fetch {
            seed: seed.to_string(),
            reason: "scripted failure (null)".into(),
        })
    }
}
