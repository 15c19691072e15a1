//! Resilient RPC dispatch for the dmesh client.
//!
//! Executes one logical RPC call against a set of candidate masternodes:
//! pick a candidate, send with a hard per-attempt timeout, absorb node-scoped
//! failures by moving to the next untried candidate, and surface everything
//! else verbatim. The retry budget is strictly the candidate-set size; a
//! node is never attempted twice within one logical call.

pub mod attempt;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod routing;
pub mod selector;
pub mod transport;

pub use attempt::RequestAttempt;
pub use dispatcher::Dispatcher;
pub use error::{AttemptFailure, DispatchError};
pub use http::HttpTransport;
pub use routing::Routing;
pub use selector::{NodeSelector, SelectError};
pub use transport::{RpcFailure, RpcTransport};
