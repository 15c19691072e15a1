//! Deterministic, chain-anchored quorum selection.
//!
//! Given a masternode list snapshot and a subject identity, computes the
//! ordered subset of masternodes ("quorum") that any other client would
//! compute for the same chain reference point, with no coordination
//! required.
//! The score construction and the reference-height quantization are protocol
//! constants: changing either breaks agreement with every other client on
//! the network.

pub mod error;
pub mod oracle;
pub mod score;
pub mod selector;

pub use error::QuorumError;
pub use oracle::BlockOracle;
pub use score::{entry_score, quorum_modifier, rank_entries, reference_height};
pub use score::{REFERENCE_INTERVAL, REFERENCE_OFFSET};
pub use selector::QuorumSelector;
