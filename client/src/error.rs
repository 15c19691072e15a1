//! Facade-level error union.

use thiserror::Error;

use dmesh_discovery::DiscoveryError;
use dmesh_dispatch::DispatchError;
use dmesh_quorum::QuorumError;

/// Errors surfaced by [`DmeshClient`](crate::DmeshClient).
///
/// None of these are process-fatal: the client stays usable after any
/// failed call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("quorum error: {0}")]
    Quorum(#[from] QuorumError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A node answered successfully but the payload did not decode into
    /// the shape a typed wrapper expects.
    #[error("invalid response payload: {0}")]
    InvalidResponse(String),
}
