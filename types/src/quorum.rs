//! The quorum descriptor — output of a deterministic quorum computation.

use serde::{Deserialize, Serialize};

use crate::id::{BlockHash, SubjectId};
use crate::masternode::MasternodeEntry;

/// A deterministically selected, ordered subset of masternodes for one
/// subject identity at one chain reference point.
///
/// For a fixed masternode list snapshot, identical
/// `(reference_height, reference_hash, subject)` always yield identical
/// `members` in identical order, so any two clients computing this agree
/// without coordination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumDescriptor {
    pub reference_height: u64,
    pub reference_hash: BlockHash,
    pub subject: SubjectId,
    /// Quorum members in ascending score order.
    pub members: Vec<MasternodeEntry>,
}

impl QuorumDescriptor {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}
