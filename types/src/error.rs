//! Parse errors for wire-facing types.

use thiserror::Error;

/// Errors produced when parsing addresses or identifiers from strings.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid address {0:?}: expected \"host:port\"")]
    InvalidAddress(String),

    #[error("invalid port in address {0:?}")]
    InvalidPort(String),

    #[error("invalid hex identifier: {0}")]
    InvalidHex(String),

    #[error("identifier must be 32 bytes, got {0}")]
    InvalidLength(usize),
}
