//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the client (clock, block oracle, node
//! transport, list source) is abstracted behind a trait. This crate provides
//! test-friendly implementations that:
//! - Return deterministic, programmable values
//! - Record what was asked of them, for assertions
//! - Never touch the network or filesystem
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod list_source;
pub mod oracle;
pub mod transport;

pub use clock::NullClock;
pub use list_source::NullListSource;
pub use oracle::NullOracle;
pub use transport::NullTransport;
