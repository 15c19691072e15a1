//! Masternode entries and the versioned masternode list.

use serde::{Deserialize, Serialize};

use crate::address::NodeAddress;
use crate::id::NodeId;

/// Operational status of a masternode as reported by discovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MasternodeStatus {
    Enabled,
    Banned,
    /// Any status this client version does not recognize.
    #[serde(other)]
    Unknown,
}

/// One masternode. Immutable once constructed; discovery replaces entries
/// wholesale on refresh, never mutates them in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasternodeEntry {
    pub address: NodeAddress,
    pub id: NodeId,
    pub status: MasternodeStatus,
}

impl MasternodeEntry {
    pub fn new(address: NodeAddress, id: NodeId, status: MasternodeStatus) -> Self {
        Self {
            address,
            id,
            status,
        }
    }

    /// Whether this node should be considered a dispatch candidate.
    pub fn is_usable(&self) -> bool {
        self.status == MasternodeStatus::Enabled
    }
}

/// An ordered snapshot of the masternode set, versioned by the chain height
/// at which it was fetched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasternodeList {
    entries: Vec<MasternodeEntry>,
    height: u64,
}

impl MasternodeList {
    pub fn new(entries: Vec<MasternodeEntry>, height: u64) -> Self {
        Self { entries, height }
    }

    pub fn entries(&self) -> &[MasternodeEntry] {
        &self.entries
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MasternodeEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(byte: u8) -> MasternodeEntry {
        MasternodeEntry::new(
            NodeAddress::new(format!("10.0.0.{byte}"), 3000),
            NodeId::new([byte; 32]),
            MasternodeStatus::Enabled,
        )
    }

    #[test]
    fn usable_depends_on_status() {
        let enabled = entry(1);
        assert!(enabled.is_usable());
        let banned =
            MasternodeEntry::new(enabled.address.clone(), enabled.id, MasternodeStatus::Banned);
        assert!(!banned.is_usable());
    }

    #[test]
    fn unknown_status_parses_from_unrecognized_string() {
        let status: MasternodeStatus = serde_json::from_str("\"SOME_FUTURE_STATE\"").unwrap();
        assert_eq!(status, MasternodeStatus::Unknown);
    }

    #[test]
    fn known_statuses_parse() {
        let status: MasternodeStatus = serde_json::from_str("\"ENABLED\"").unwrap();
        assert_eq!(status, MasternodeStatus::Enabled);
        let status: MasternodeStatus = serde_json::from_str("\"BANNED\"").unwrap();
        assert_eq!(status, MasternodeStatus::Banned);
    }

    #[test]
    fn list_preserves_order_and_height() {
        let list = MasternodeList::new(vec![entry(3), entry(1), entry(2)], 4200);
        assert_eq!(list.len(), 3);
        assert_eq!(list.height(), 4200);
        assert_eq!(list.entries()[0], entry(3));
    }
}
