//! Constants for the fetch module (timeout configuration).

/// HTTP connect timeout (10 seconds). The per-request timeout supplied by
/// the caller bounds the whole request; this only caps connection setup.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Minimum accepted per-request timeout in seconds.
pub const MIN_TIMEOUT_SECS: u64 = 5;

/// Maximum accepted per-request timeout in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 120;
