//! Nullable block oracle — deterministic chain state.

use std::collections::HashMap;
use std::sync::Mutex;

use dmesh_quorum::{BlockOracle, QuorumError};
use dmesh_types::BlockHash;

/// A deterministic [`BlockOracle`] for testing.
///
/// Returns a programmable best height and per-height hashes. Heights with no
/// scripted hash get a derived one (the height in the leading bytes), so any
/// reference height resolves deterministically without scripting every
/// window. Flip `set_unavailable` to simulate an oracle outage.
pub struct NullOracle {
    best_height: Mutex<u64>,
    hashes: Mutex<HashMap<u64, BlockHash>>,
    unavailable: Mutex<bool>,
}

impl NullOracle {
    pub fn new(best_height: u64) -> Self {
        Self {
            best_height: Mutex::new(best_height),
            hashes: Mutex::new(HashMap::new()),
            unavailable: Mutex::new(false),
        }
    }

    /// Script the hash for one height.
    pub fn insert_hash(&self, height: u64, hash: BlockHash) {
        self.hashes.lock().unwrap().insert(height, hash);
    }

    /// Move the chain tip.
    pub fn set_best_height(&self, height: u64) {
        *self.best_height.lock().unwrap() = height;
    }

    /// Make both operations fail until reset to `false`.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    fn check_available(&self) -> Result<(), QuorumError> {
        if *self.unavailable.lock().unwrap() {
            return Err(QuorumError::OracleUnavailable("oracle offline (null)".into()));
        }
        Ok(())
    }

    /// The hash returned for unscripted heights.
    pub fn derived_hash(height: u64) -> BlockHash {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&height.to_be_bytes());
        BlockHash::new(bytes)
    }
}

impl BlockOracle for NullOracle {
    async fn best_height(&self) -> Result<u64, QuorumError> {
        self.check_available()?;
        Ok(*self.best_height.lock().unwrap())
    }

    async fn block_hash(&self, height: u64) -> Result<BlockHash, QuorumError> {
        self.check_available()?;
        let scripted = self.hashes.lock().unwrap().get(&height).copied();
        Ok(scripted.unwrap_or_else(|| Self::derived_hash(height)))
    }
}
