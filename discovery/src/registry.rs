//! The masternode registry — snapshot cache with lazy, collapsing refresh.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use rand::Rng;
use tokio::sync::Mutex;

use dmesh_types::{MasternodeEntry, MasternodeList, NodeAddress};

use crate::error::DiscoveryError;
use crate::source::MasternodeListSource;

/// One installed list with the time it was fetched.
struct Snapshot {
    list: Arc<MasternodeList>,
    fetched_at_secs: u64,
}

/// Owns the current masternode list and is its sole mutator.
///
/// Readers get `Arc` snapshots: a concurrent refresh replaces the pointer,
/// never the contents, so a reader observes either the old or the new list
/// in full. Overlapping refreshes collapse into a single network fetch.
///
/// Time is passed in as `now_secs` rather than read from the wall clock, so
/// tests drive the TTL deterministically.
pub struct MasternodeRegistry<S> {
    source: S,
    seeds: Vec<NodeAddress>,
    ttl_secs: u64,
    snapshot: RwLock<Option<Snapshot>>,
    /// Gates the network fetch; waiters re-check `generation` after
    /// acquiring so a refresh that finished while they queued is not
    /// repeated.
    refresh_gate: Mutex<()>,
    generation: AtomicU64,
}

impl<S: MasternodeListSource> MasternodeRegistry<S> {
    pub fn new(source: S, seeds: Vec<NodeAddress>, ttl_secs: u64) -> Self {
        Self {
            source,
            seeds,
            ttl_secs,
            snapshot: RwLock::new(None),
            refresh_gate: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// The configured bootstrap seeds.
    pub fn seeds(&self) -> &[NodeAddress] {
        &self.seeds
    }

    /// Fetch a fresh list and atomically replace the snapshot.
    ///
    /// Seeds are tried in order until one yields a usable list. On failure
    /// the previous snapshot is kept untouched; the registry never regresses
    /// to empty. Concurrent callers collapse into one fetch: whoever loses
    /// the race returns as soon as the winner has installed a new list.
    pub async fn refresh(&self, now_secs: u64) -> Result<(), DiscoveryError> {
        if self.seeds.is_empty() {
            return Err(DiscoveryError::NoSeeds);
        }

        let generation_before = self.generation.load(Ordering::Acquire);
        let _gate = self.refresh_gate.lock().await;
        if self.generation.load(Ordering::Acquire) != generation_before {
            return Ok(());
        }

        let mut last_error: Option<DiscoveryError> = None;
        for seed in &self.seeds {
            match self.source.fetch_list(seed).await {
                Ok(list) => {
                    let usable: Vec<MasternodeEntry> = list
                        .entries()
                        .iter()
                        .filter(|entry| entry.is_usable())
                        .cloned()
                        .collect();
                    if usable.is_empty() {
                        tracing::warn!(%seed, "seed returned no usable masternodes");
                        last_error = Some(DiscoveryError::EmptySet {
                            seed: seed.to_string(),
                        });
                        continue;
                    }
                    let count = usable.len();
                    let height = list.height();
                    self.install(MasternodeList::new(usable, height), now_secs);
                    tracing::info!(count, height, %seed, "masternode list refreshed");
                    return Ok(());
                }
                Err(error) => {
                    tracing::warn!(%seed, %error, "masternode list fetch failed");
                    last_error = Some(error);
                }
            }
        }

        Err(DiscoveryError::AllSeedsFailed {
            attempted: self.seeds.len(),
            last: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no seeds attempted".into()),
        })
    }

    /// Refresh lazily: fetch on first use and once the TTL has elapsed.
    ///
    /// A failed re-refresh keeps serving the stale snapshot: a stale list
    /// is still dispatchable, and per-node failures are the dispatcher's
    /// problem. Only a registry that has never been populated errors here.
    pub async fn ensure_fresh(&self, now_secs: u64) -> Result<(), DiscoveryError> {
        let populated = {
            let guard = self.snapshot.read().expect("registry lock poisoned");
            match guard.as_ref() {
                Some(snap) if now_secs.saturating_sub(snap.fetched_at_secs) < self.ttl_secs => {
                    return Ok(());
                }
                Some(_) => true,
                None => false,
            }
        };

        match self.refresh(now_secs).await {
            Ok(()) => Ok(()),
            Err(error) if populated => {
                tracing::warn!(%error, "refresh failed, serving previous masternode list");
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// The current snapshot.
    pub fn get_list(&self) -> Result<Arc<MasternodeList>, DiscoveryError> {
        let guard = self.snapshot.read().expect("registry lock poisoned");
        guard
            .as_ref()
            .map(|snap| Arc::clone(&snap.list))
            .ok_or(DiscoveryError::EmptyRegistry)
    }

    /// One entry chosen uniformly at random from the current snapshot.
    pub fn get_random(&self) -> Result<MasternodeEntry, DiscoveryError> {
        let list = self.get_list()?;
        let index = rand::rng().random_range(0..list.len());
        Ok(list.entries()[index].clone())
    }

    fn install(&self, list: MasternodeList, now_secs: u64) {
        let mut guard = self.snapshot.write().expect("registry lock poisoned");
        *guard = Some(Snapshot {
            list: Arc::new(list),
            fetched_at_secs: now_secs,
        });
        self.generation.fetch_add(1, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmesh_types::{MasternodeStatus, NodeId};
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn entry(byte: u8) -> MasternodeEntry {
        MasternodeEntry::new(
            NodeAddress::new(format!("10.0.0.{byte}"), 3000),
            NodeId::new([byte; 32]),
            MasternodeStatus::Enabled,
        )
    }

    fn seed() -> NodeAddress {
        NodeAddress::new("seed.dmesh.org", 3000)
    }

    /// Scripted source: pops one outcome per fetch, `None` meaning failure.
    /// An optional delay makes refresh races observable.
    struct ScriptedSource {
        outcomes: std::sync::Mutex<Vec<Option<MasternodeList>>>,
        fetches: AtomicUsize,
        delay: Option<Duration>,
    }

    impl ScriptedSource {
        fn new(outcomes: Vec<Option<MasternodeList>>) -> Self {
            Self {
                outcomes: std::sync::Mutex::new(outcomes),
                fetches: AtomicUsize::new(0),
                delay: None,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl MasternodeListSource for ScriptedSource {
        async fn fetch_list(&self, seed: &NodeAddress) -> Result<MasternodeList, DiscoveryError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let next = self.outcomes.lock().unwrap().pop();
            match next.flatten() {
                Some(list) => Ok(list),
                None => Err(DiscoveryError::Fetch {
                    seed: seed.to_string(),
                    reason: "scripted failure".into(),
                }),
            }
        }
    }

    fn list(count: u8) -> MasternodeList {
        MasternodeList::new((1..=count).map(entry).collect(), 1000)
    }

    #[tokio::test]
    async fn refresh_populates_registry() {
        let registry =
            MasternodeRegistry::new(ScriptedSource::new(vec![Some(list(3))]), vec![seed()], 60);
        registry.refresh(0).await.unwrap();
        assert_eq!(registry.get_list().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        // Outcomes pop from the back: first fetch succeeds, second fails.
        let registry = MasternodeRegistry::new(
            ScriptedSource::new(vec![None, Some(list(3))]),
            vec![seed()],
            60,
        );
        registry.refresh(0).await.unwrap();
        let err = registry.refresh(10).await.unwrap_err();
        assert!(matches!(err, DiscoveryError::AllSeedsFailed { .. }));
        assert_eq!(registry.get_list().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn refresh_rejects_all_banned_list() {
        let banned = MasternodeList::new(
            vec![MasternodeEntry::new(
                NodeAddress::new("10.0.0.1", 3000),
                NodeId::new([1; 32]),
                MasternodeStatus::Banned,
            )],
            1000,
        );
        let registry =
            MasternodeRegistry::new(ScriptedSource::new(vec![Some(banned)]), vec![seed()], 60);
        let err = registry.refresh(0).await.unwrap_err();
        assert!(matches!(err, DiscoveryError::AllSeedsFailed { .. }));
        assert!(matches!(
            registry.get_list(),
            Err(DiscoveryError::EmptyRegistry)
        ));
    }

    #[tokio::test]
    async fn refresh_fails_over_to_second_seed() {
        let seeds = vec![seed(), NodeAddress::new("seed2.dmesh.org", 3000)];
        // First fetch (seed 1) fails, second (seed 2) succeeds.
        let source = ScriptedSource::new(vec![Some(list(2)), None]);
        let registry = MasternodeRegistry::new(source, seeds, 60);
        registry.refresh(0).await.unwrap();
        assert_eq!(registry.get_list().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn get_random_errors_before_population() {
        let registry = MasternodeRegistry::new(ScriptedSource::new(vec![]), vec![seed()], 60);
        assert!(matches!(
            registry.get_random(),
            Err(DiscoveryError::EmptyRegistry)
        ));
    }

    #[tokio::test]
    async fn get_random_hits_every_entry() {
        let registry =
            MasternodeRegistry::new(ScriptedSource::new(vec![Some(list(5))]), vec![seed()], 60);
        registry.refresh(0).await.unwrap();

        let mut hits: HashMap<NodeId, usize> = HashMap::new();
        for _ in 0..1000 {
            let picked = registry.get_random().unwrap();
            *hits.entry(picked.id).or_default() += 1;
        }
        assert_eq!(hits.len(), 5);
        for count in hits.values() {
            assert!(*count > 0);
        }
    }

    #[tokio::test]
    async fn concurrent_refreshes_collapse_into_one_fetch() {
        let source = ScriptedSource::new(vec![Some(list(3)), Some(list(3))])
            .with_delay(Duration::from_millis(50));
        let registry = Arc::new(MasternodeRegistry::new(source, vec![seed()], 60));

        let a = Arc::clone(&registry);
        let b = Arc::clone(&registry);
        let (ra, rb) = tokio::join!(a.refresh(0), b.refresh(0));
        ra.unwrap();
        rb.unwrap();

        assert_eq!(registry.source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn ensure_fresh_respects_ttl() {
        let source = ScriptedSource::new(vec![Some(list(4)), Some(list(3))]);
        let registry = MasternodeRegistry::new(source, vec![seed()], 60);

        registry.ensure_fresh(0).await.unwrap();
        assert_eq!(registry.source.fetch_count(), 1);

        // Within the TTL: no new fetch.
        registry.ensure_fresh(59).await.unwrap();
        assert_eq!(registry.source.fetch_count(), 1);

        // TTL elapsed: refetches and installs the newer list.
        registry.ensure_fresh(60).await.unwrap();
        assert_eq!(registry.source.fetch_count(), 2);
        assert_eq!(registry.get_list().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn ensure_fresh_serves_stale_list_when_refresh_fails() {
        let source = ScriptedSource::new(vec![None, Some(list(3))]);
        let registry = MasternodeRegistry::new(source, vec![seed()], 60);

        registry.ensure_fresh(0).await.unwrap();
        registry.ensure_fresh(120).await.unwrap();
        assert_eq!(registry.get_list().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn ensure_fresh_errors_when_never_populated() {
        let registry = MasternodeRegistry::new(ScriptedSource::new(vec![None]), vec![seed()], 60);
        assert!(registry.ensure_fresh(0).await.is_err());
    }

    #[tokio::test]
    async fn refresh_with_no_seeds_errors() {
        let registry = MasternodeRegistry::new(ScriptedSource::new(vec![]), vec![], 60);
        assert!(matches!(
            registry.refresh(0).await,
            Err(DiscoveryError::NoSeeds)
        ));
    }
}
