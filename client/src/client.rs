//! The client facade.

use std::sync::Arc;
use std::time::Duration;

use dmesh_discovery::MasternodeRegistry;
use dmesh_dispatch::{Dispatcher, HttpTransport, Routing, RpcTransport};
use dmesh_quorum::QuorumSelector;
use dmesh_types::{MasternodeList, QuorumDescriptor, SubjectId};
use dmesh_utils::unix_now_secs;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::list_source::RpcListSource;
use crate::oracle::RpcBlockOracle;
use crate::selector::{RandomSelector, RegistrySelector};

type Source<T> = RpcListSource<T>;
type Oracle<T> = RpcBlockOracle<T, Source<T>>;

/// Location-transparent client for the dmesh masternode network.
///
/// Owns the masternode registry, the quorum selector, and the dispatcher.
/// All methods take `&self`; any number of logical calls may run
/// concurrently; the registry snapshot is the only shared state and is
/// replaced, never mutated, on refresh.
pub struct DmeshClient<T: RpcTransport + Clone = HttpTransport> {
    config: ClientConfig,
    registry: Arc<MasternodeRegistry<Source<T>>>,
    quorum: Arc<QuorumSelector<Oracle<T>>>,
    dispatcher: Dispatcher<T, RegistrySelector<Source<T>, Oracle<T>>>,
}

impl<T: RpcTransport + Clone> std::fmt::Debug for DmeshClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DmeshClient").finish_non_exhaustive()
    }
}

impl DmeshClient<HttpTransport> {
    /// Create a client speaking JSON-RPC over HTTP, per the configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::with_timeouts(
            Duration::from_secs(config.timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        );
        Self::with_transport(config, transport)
    }
}

impl<T: RpcTransport + Clone> DmeshClient<T> {
    /// Create a client over a custom transport. This is the seam tests use
    /// to run the full stack against scripted transports.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ClientError> {
        let seeds = config.seed_addresses()?;
        if seeds.is_empty() {
            return Err(ClientError::Config(
                "at least one bootstrap seed is required".into(),
            ));
        }

        // Hard per-attempt cap sits above the transport's own timeout so a
        // wedged connection cannot stall the retry loop.
        let attempt_timeout = Duration::from_secs(config.timeout_secs + 1);

        let registry = Arc::new(MasternodeRegistry::new(
            RpcListSource::new(transport.clone()),
            seeds,
            config.list_ttl_secs,
        ));

        let oracle = RpcBlockOracle::new(Dispatcher::new(
            transport.clone(),
            RandomSelector::new(Arc::clone(&registry)),
            attempt_timeout,
        ));
        let quorum = Arc::new(QuorumSelector::new(oracle, config.quorum_size));

        let dispatcher = Dispatcher::new(
            transport,
            RegistrySelector::new(Arc::clone(&registry), Arc::clone(&quorum)),
            attempt_timeout,
        );

        tracing::info!(
            seeds = registry.seeds().len(),
            quorum_size = config.quorum_size,
            "dmesh client created"
        );

        Ok(Self {
            config,
            registry,
            quorum,
            dispatcher,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute one logical RPC call under the given routing policy.
    ///
    /// Refreshes the masternode list lazily first (initial population, then
    /// TTL expiry), then dispatches with retry/failover across candidates.
    pub async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
        routing: Routing,
    ) -> Result<serde_json::Value, ClientError> {
        self.registry.ensure_fresh(unix_now_secs()).await?;
        Ok(self.dispatcher.call(method, params, routing).await?)
    }

    /// Compute the quorum for `subject` against the current list snapshot.
    ///
    /// Exposed for collaborators that need membership directly, e.g. to fan
    /// out a consistency check across all quorum members.
    pub async fn compute_quorum(
        &self,
        subject: &SubjectId,
    ) -> Result<QuorumDescriptor, ClientError> {
        self.registry.ensure_fresh(unix_now_secs()).await?;
        let list = self.registry.get_list()?;
        Ok(self.quorum.compute_quorum(&list, subject).await?)
    }

    /// Force a masternode list refresh now.
    ///
    /// Callers typically do this after repeated
    /// [`DispatchError::Exhausted`](dmesh_dispatch::DispatchError) failures
    /// suggest the cached list has gone stale.
    pub async fn refresh_masternode_list(&self) -> Result<(), ClientError> {
        Ok(self.registry.refresh(unix_now_secs()).await?)
    }

    /// The current masternode list snapshot.
    pub fn masternode_list(&self) -> Result<Arc<MasternodeList>, ClientError> {
        Ok(self.registry.get_list()?)
    }
}
