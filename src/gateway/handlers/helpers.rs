//! Handler helper functions
//!
//! Shared utilities used by multiple handlers.

use std::time::{SystemTime, UNIX_EPOCH};

/// Build version reported by the health endpoint
pub const BUILD_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("GIT_HASH"));

/// Get current time in milliseconds
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
