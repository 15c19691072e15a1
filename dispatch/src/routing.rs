//! How a logical call chooses its candidate nodes.

use dmesh_types::SubjectId;

/// Routing policy for one logical RPC call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Routing {
    /// Any masternode will do — general reads. Candidates are drawn
    /// uniformly at random without replacement.
    Random,
    /// The call is scoped to an identity and must go to that identity's
    /// quorum, probed in deterministic quorum order so every client prefers
    /// the same nodes.
    QuorumOf(SubjectId),
}
