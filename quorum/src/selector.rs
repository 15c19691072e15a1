//! The quorum selector — pure computation over oracle-supplied chain state.

use dmesh_types::{MasternodeList, QuorumDescriptor, SubjectId};

use crate::error::QuorumError;
use crate::oracle::BlockOracle;
use crate::score::{rank_entries, reference_height};

/// Computes the deterministic quorum for a subject identity.
///
/// Holds no state beyond its oracle handle and the configured quorum size;
/// every computation is pure given the oracle's answers and the list
/// snapshot, so two selector instances fed identical inputs agree exactly.
pub struct QuorumSelector<O> {
    oracle: O,
    quorum_size: usize,
}

impl<O: BlockOracle> QuorumSelector<O> {
    pub fn new(oracle: O, quorum_size: usize) -> Self {
        Self {
            oracle,
            quorum_size,
        }
    }

    pub fn quorum_size(&self) -> usize {
        self.quorum_size
    }

    /// Compute the quorum for `subject` against the given list snapshot.
    ///
    /// Anchors to the quantized reference height so repeated calls within
    /// one interval window select the same members.
    pub async fn compute_quorum(
        &self,
        list: &MasternodeList,
        subject: &SubjectId,
    ) -> Result<QuorumDescriptor, QuorumError> {
        if list.len() < self.quorum_size {
            return Err(QuorumError::InsufficientMembers {
                have: list.len(),
                need: self.quorum_size,
            });
        }

        let best = self.oracle.best_height().await?;
        let ref_height = reference_height(best);
        let ref_hash = self.oracle.block_hash(ref_height).await?;

        let ranked = rank_entries(list.entries(), &ref_hash, subject);
        let members: Vec<_> = ranked.into_iter().take(self.quorum_size).collect();

        tracing::debug!(
            subject = %subject,
            reference_height = ref_height,
            size = members.len(),
            "quorum computed"
        );

        Ok(QuorumDescriptor {
            reference_height: ref_height,
            reference_hash: ref_hash,
            subject: *subject,
            members,
        })
    }
}
