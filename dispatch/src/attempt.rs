//! Per-call attempt tracking.

use std::collections::HashSet;

use dmesh_types::NodeId;

/// Tracks which nodes one logical call has already probed.
///
/// Created per call, dropped when the call resolves; never persisted or
/// shared. The tried set is what bounds the retry loop.
#[derive(Debug)]
pub struct RequestAttempt {
    method: String,
    params: serde_json::Value,
    tried: HashSet<NodeId>,
    attempt_count: usize,
}

impl RequestAttempt {
    pub fn new(method: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            method: method.into(),
            params,
            tried: HashSet::new(),
            attempt_count: 0,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &serde_json::Value {
        &self.params
    }

    /// Claim a node for an attempt. Returns `false` (and records nothing)
    /// when the node was already tried within this call.
    pub fn claim(&mut self, node: NodeId) -> bool {
        if !self.tried.insert(node) {
            return false;
        }
        self.attempt_count += 1;
        true
    }

    pub fn attempt_count(&self) -> usize {
        self.attempt_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_rejects_repeat_nodes() {
        let mut attempt = RequestAttempt::new("getStatus", serde_json::json!({}));
        let node = NodeId::new([1; 32]);
        assert!(attempt.claim(node));
        assert!(!attempt.claim(node));
        assert_eq!(attempt.attempt_count(), 1);
    }

    #[test]
    fn distinct_nodes_each_count_once() {
        let mut attempt = RequestAttempt::new("getStatus", serde_json::json!({}));
        assert!(attempt.claim(NodeId::new([1; 32])));
        assert!(attempt.claim(NodeId::new([2; 32])));
        assert_eq!(attempt.attempt_count(), 2);
    }
}
