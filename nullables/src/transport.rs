//! Nullable transport — scripted RPC outcomes, no network.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use dmesh_dispatch::{RpcFailure, RpcTransport};
use dmesh_types::NodeAddress;

/// A test transport that replays scripted outcomes instead of sending.
///
/// Outcomes are looked up per address first (consumed in order), then per
/// method (repeatable stub). Every call is recorded for assertions.
pub struct NullTransport {
    per_address: Mutex<HashMap<String, VecDeque<Result<serde_json::Value, RpcFailure>>>>,
    per_method: Mutex<HashMap<String, Result<serde_json::Value, RpcFailure>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl NullTransport {
    pub fn new() -> Self {
        Self {
            per_address: Mutex::new(HashMap::new()),
            per_method: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue one outcome for the next request to `address`.
    pub fn enqueue(&self, address: &NodeAddress, outcome: Result<serde_json::Value, RpcFailure>) {
        self.per_address
            .lock()
            .unwrap()
            .entry(address.to_string())
            .or_default()
            .push_back(outcome);
    }

    /// Stub every request for `method` (any address) with the same outcome.
    /// Per-address queues take precedence.
    pub fn stub_method(&self, method: &str, outcome: Result<serde_json::Value, RpcFailure>) {
        self.per_method
            .lock()
            .unwrap()
            .insert(method.to_string(), outcome);
    }

    /// All recorded `(address, method)` calls, in order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls for one method.
    pub fn calls_for_method(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, m)| m == method)
            .count()
    }

    /// Clear all scripted outcomes and recorded calls.
    pub fn reset(&self) {
        self.per_address.lock().unwrap().clear();
        self.per_method.lock().unwrap().clear();
        self.calls.lock().unwrap().clear();
    }
}

impl Default for NullTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcTransport for NullTransport {
    async fn request(
        &self,
        address: &NodeAddress,
        method: &str,
        _params: &serde_json::Value,
    ) -> Result<serde_json::Value, RpcFailure> {
        let key = address.to_string();
        self.calls
            .lock()
            .unwrap()
            .push((key.clone(), method.to_string()));

        if let Some(queue) = self.per_address.lock().unwrap().get_mut(&key) {
            if let Some(outcome) = queue.pop_front() {
                return outcome;
            }
        }

        if let Some(outcome) = self.per_method.lock().unwrap().get(method) {
            return outcome.clone();
        }

        Err(RpcFailure::Transport(format!(
            "no scripted response for {key} {method} (null)"
        )))
    }
}
