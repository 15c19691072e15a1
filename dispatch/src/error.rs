//! Dispatch errors.

use std::fmt;

use thiserror::Error;

use dmesh_types::{NodeAddress, NodeId};

use crate::selector::SelectError;
use crate::transport::RpcFailure;

/// One absorbed node failure, kept for the exhaustion report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptFailure {
    pub node: NodeId,
    pub address: NodeAddress,
    pub failure: RpcFailure,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.node, self.address, self.failure)
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Candidate selection produced an empty set.
    #[error("no candidate nodes available")]
    NoCandidates,

    /// Candidate selection itself failed (registry or quorum).
    #[error("candidate selection failed: {0}")]
    Selection(#[from] SelectError),

    /// A node returned a well-formed error about the request. Surfaced
    /// immediately; no other candidate was attempted after it.
    #[error("application error {code}: {message}")]
    Application { code: i64, message: String },

    /// Every candidate failed. Carries one failure per attempted node,
    /// in attempt order.
    #[error("request exhausted after {} failed attempts", .failures.len())]
    Exhausted { failures: Vec<AttemptFailure> },
}
