//! Shared utilities for the dmesh client.

pub mod logging;
pub mod time;

pub use logging::init_tracing;
pub use time::unix_now_secs;
