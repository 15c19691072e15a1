//! The retry/failover loop for one logical RPC call.

use std::time::Duration;

use dmesh_types::MasternodeEntry;

use crate::attempt::RequestAttempt;
use crate::error::{AttemptFailure, DispatchError};
use crate::routing::Routing;
use crate::selector::NodeSelector;
use crate::transport::{RpcFailure, RpcTransport};

/// Executes one logical RPC call reliably despite unreliable nodes.
///
/// Candidates are attempted strictly sequentially, never fanned out in
/// parallel, so a write reaches at most one node per attempt. Node-scoped
/// failures (`Transport`, `Protocol`) are absorbed and the next untried
/// candidate is probed; anything else surfaces immediately. The dispatcher
/// never mutates registry or selector state.
pub struct Dispatcher<T, S> {
    transport: T,
    selector: S,
    attempt_timeout: Duration,
}

impl<T: RpcTransport, S: NodeSelector> Dispatcher<T, S> {
    pub fn new(transport: T, selector: S, attempt_timeout: Duration) -> Self {
        Self {
            transport,
            selector,
            attempt_timeout,
        }
    }

    /// Execute one logical call under the given routing policy.
    pub async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
        routing: Routing,
    ) -> Result<serde_json::Value, DispatchError> {
        let candidates = self.selector.candidates(&routing).await?;
        if candidates.is_empty() {
            return Err(DispatchError::NoCandidates);
        }

        let mut attempt = RequestAttempt::new(method, params);
        let mut failures: Vec<AttemptFailure> = Vec::new();

        for candidate in candidates {
            if !attempt.claim(candidate.id) {
                continue;
            }

            match self.send_once(&candidate, &attempt).await {
                Ok(value) => {
                    tracing::debug!(
                        method,
                        node = %candidate.id,
                        attempts = attempt.attempt_count(),
                        "dispatch succeeded"
                    );
                    return Ok(value);
                }
                Err(RpcFailure::Application { code, message }) => {
                    return Err(DispatchError::Application { code, message });
                }
                Err(failure) => {
                    tracing::debug!(
                        method,
                        node = %candidate.id,
                        %failure,
                        "attempt failed, moving to next candidate"
                    );
                    failures.push(AttemptFailure {
                        node: candidate.id,
                        address: candidate.address.clone(),
                        failure,
                    });
                }
            }
        }

        Err(DispatchError::Exhausted { failures })
    }

    /// One attempt against one node, capped by the hard per-attempt timeout
    /// so an abandoned call cannot hold a connection indefinitely.
    async fn send_once(
        &self,
        candidate: &MasternodeEntry,
        attempt: &RequestAttempt,
    ) -> Result<serde_json::Value, RpcFailure> {
        let request = self
            .transport
            .request(&candidate.address, attempt.method(), attempt.params());
        match tokio::time::timeout(self.attempt_timeout, request).await {
            Ok(outcome) => outcome,
            Err(_) => Err(RpcFailure::Transport(format!(
                "attempt timed out after {:?}",
                self.attempt_timeout
            ))),
        }
    }
}
