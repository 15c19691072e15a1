//! The protocol-pinned score function and reference-height quantization.
//!
//! Every constant and byte-ordering choice in this module is part of the
//! wire protocol: independent clients must produce bit-identical rankings
//! from identical inputs. Do not change any of it without a network-wide
//! protocol version bump.

use sha2::{Digest, Sha256};

use dmesh_types::{BlockHash, MasternodeEntry, SubjectId};

/// Reference heights are quantized down to multiples of this interval, so
/// every client inside one window anchors to the same block.
pub const REFERENCE_INTERVAL: u64 = 24;

/// Blocks subtracted after quantization, keeping the reference clear of
/// tip heights that a reorg could still replace.
pub const REFERENCE_OFFSET: u64 = 8;

/// Quantize the best chain height to the reference height for quorum
/// computation: floor to the nearest [`REFERENCE_INTERVAL`] multiple, then
/// subtract [`REFERENCE_OFFSET`], saturating at zero.
pub fn reference_height(best_height: u64) -> u64 {
    let quantized = best_height - best_height % REFERENCE_INTERVAL;
    quantized.saturating_sub(REFERENCE_OFFSET)
}

/// The per-epoch modifier: `SHA-256(reference_hash ‖ subject_id)`.
pub fn quorum_modifier(reference_hash: &BlockHash, subject: &SubjectId) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(reference_hash.as_bytes());
    hasher.update(subject.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// One entry's score: `SHA-256(node_id) XOR modifier`, compared as a
/// big-endian 32-byte array. Lower is closer.
pub fn entry_score(modifier: &[u8; 32], entry: &MasternodeEntry) -> [u8; 32] {
    let digest = Sha256::digest(entry.id.as_bytes());
    let mut out = [0u8; 32];
    for (i, byte) in digest.iter().enumerate() {
        out[i] = byte ^ modifier[i];
    }
    out
}

/// Rank entries by ascending score, ties broken by ascending node id so the
/// order is total even for adversarially chosen identifiers.
pub fn rank_entries(
    entries: &[MasternodeEntry],
    reference_hash: &BlockHash,
    subject: &SubjectId,
) -> Vec<MasternodeEntry> {
    let modifier = quorum_modifier(reference_hash, subject);
    let mut scored: Vec<([u8; 32], MasternodeEntry)> = entries
        .iter()
        .map(|entry| (entry_score(&modifier, entry), entry.clone()))
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));
    scored.into_iter().map(|(_, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmesh_types::{MasternodeStatus, NodeAddress, NodeId};

    fn entry(byte: u8) -> MasternodeEntry {
        MasternodeEntry::new(
            NodeAddress::new(format!("10.0.0.{byte}"), 3000),
            NodeId::new([byte; 32]),
            MasternodeStatus::Enabled,
        )
    }

    #[test]
    fn reference_height_locks_protocol_constants() {
        // 1047 -> quantized 1032, minus offset 8
        assert_eq!(reference_height(1047), 1024);
        // 1000 -> quantized 984, minus offset 8
        assert_eq!(reference_height(1000), 976);
    }

    #[test]
    fn reference_height_stable_across_one_window() {
        let base = reference_height(1032);
        for h in 1032..1032 + REFERENCE_INTERVAL {
            assert_eq!(reference_height(h), base);
        }
        assert_ne!(reference_height(1032 + REFERENCE_INTERVAL), base);
    }

    #[test]
    fn reference_height_saturates_near_genesis() {
        assert_eq!(reference_height(0), 0);
        assert_eq!(reference_height(REFERENCE_OFFSET - 1), 0);
        assert_eq!(reference_height(REFERENCE_INTERVAL), REFERENCE_INTERVAL - REFERENCE_OFFSET);
    }

    #[test]
    fn modifier_depends_on_both_inputs() {
        let hash_a = BlockHash::new([1; 32]);
        let hash_b = BlockHash::new([2; 32]);
        let subj_a = SubjectId::new([3; 32]);
        let subj_b = SubjectId::new([4; 32]);
        assert_ne!(
            quorum_modifier(&hash_a, &subj_a),
            quorum_modifier(&hash_b, &subj_a)
        );
        assert_ne!(
            quorum_modifier(&hash_a, &subj_a),
            quorum_modifier(&hash_a, &subj_b)
        );
    }

    #[test]
    fn ranking_is_deterministic() {
        let entries: Vec<_> = (1..=7).map(entry).collect();
        let hash = BlockHash::new([9; 32]);
        let subject = SubjectId::new([7; 32]);
        let first = rank_entries(&entries, &hash, &subject);
        let second = rank_entries(&entries, &hash, &subject);
        assert_eq!(first, second);
    }

    #[test]
    fn ranking_is_input_order_independent() {
        let mut entries: Vec<_> = (1..=7).map(entry).collect();
        let hash = BlockHash::new([9; 32]);
        let subject = SubjectId::new([7; 32]);
        let ranked = rank_entries(&entries, &hash, &subject);
        entries.reverse();
        assert_eq!(rank_entries(&entries, &hash, &subject), ranked);
    }

    #[test]
    fn duplicate_ids_tie_break_without_panicking() {
        // Two distinct addresses sharing an id must still order totally.
        let a = MasternodeEntry::new(
            NodeAddress::new("10.0.0.1", 3000),
            NodeId::new([5; 32]),
            MasternodeStatus::Enabled,
        );
        let b = MasternodeEntry::new(
            NodeAddress::new("10.0.0.2", 3000),
            NodeId::new([5; 32]),
            MasternodeStatus::Enabled,
        );
        let ranked = rank_entries(
            &[a, b],
            &BlockHash::new([1; 32]),
            &SubjectId::new([2; 32]),
        );
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn different_subjects_usually_rank_differently() {
        let entries: Vec<_> = (1..=16).map(entry).collect();
        let hash = BlockHash::new([9; 32]);
        let a = rank_entries(&entries, &hash, &SubjectId::new([1; 32]));
        let b = rank_entries(&entries, &hash, &SubjectId::new([2; 32]));
        assert_ne!(a, b);
    }
}
