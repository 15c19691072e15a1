//! The node RPC transport boundary and the per-attempt failure taxonomy.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use dmesh_types::NodeAddress;

/// Outcome of one attempt against one node.
///
/// The split drives the retry loop: `Transport` and `Protocol` are
/// node-health signals and the dispatcher moves on to the next candidate;
/// `Application` is the node answering the request itself and is returned
/// to the caller untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RpcFailure {
    /// Node unreachable or timed out.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Node answered, but the response was malformed or undecodable.
    #[error("protocol failure: {0}")]
    Protocol(String),

    /// Well-formed error from the node about the request itself
    /// (e.g. "not found"). Not a reliability failure; never retried.
    #[error("application error {code}: {message}")]
    Application { code: i64, message: String },
}

impl RpcFailure {
    /// Whether the retry loop may absorb this failure and try another node.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Application { .. })
    }
}

/// Sends one RPC request to one node.
///
/// Implementations own connection pooling and their own timeouts; the
/// dispatcher additionally applies a hard per-attempt timeout above this
/// boundary. Security layering (TLS, auth) is an implementation concern.
pub trait RpcTransport: Send + Sync {
    fn request(
        &self,
        address: &NodeAddress,
        method: &str,
        params: &serde_json::Value,
    ) -> impl Future<Output = Result<serde_json::Value, RpcFailure>> + Send;
}

impl<T: RpcTransport> RpcTransport for Arc<T> {
    fn request(
        &self,
        address: &NodeAddress,
        method: &str,
        params: &serde_json::Value,
    ) -> impl Future<Output = Result<serde_json::Value, RpcFailure>> + Send {
        (**self).request(address, method, params)
    }
}
