//! Client for the dmesh masternode network.
//!
//! Wires the three core pieces together behind one facade:
//! - discovery keeps a current masternode list from bootstrap seeds,
//! - the quorum selector deterministically derives the authoritative node
//!   subset for an identity, anchored to chain state,
//! - the dispatcher executes calls with retry/failover across candidates.
//!
//! ```no_run
//! use dmesh_client::{ClientConfig, DmeshClient};
//! use dmesh_dispatch::Routing;
//!
//! # async fn run() -> Result<(), dmesh_client::ClientError> {
//! dmesh_utils::init_tracing();
//!
//! let mut config = ClientConfig::default();
//! config.seeds = vec!["seed1.dmesh.org".into(), "seed2.dmesh.org:4100".into()];
//! let client = DmeshClient::new(config)?;
//! let _height = client.best_block_height().await?;
//! let _status = client
//!     .call("getStatus", serde_json::json!({}), Routing::Random)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod list_source;
pub mod methods;
pub mod oracle;
pub mod selector;

pub use client::DmeshClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use list_source::RpcListSource;
pub use methods::Utxo;
pub use oracle::RpcBlockOracle;
pub use selector::{RandomSelector, RegistrySelector};
