//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! service, including hop/time budgets and operational limits. The CLI can
//! override the budgets; the constants are the defaults.

// Redirect handling
/// Maximum number of redirect hops to follow per resolution.
/// Prevents infinite redirect loops and excessive request chains.
pub const MAX_REDIRECT_HOPS: usize = 10;

// Network operation timeouts
/// Per-request timeout in milliseconds. Exceeding it cancels only the
/// in-flight request, but terminates the whole resolution with a timeout
/// failure (no retries).
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;
/// Overall wall-clock budget for a single resolution in milliseconds,
/// checked before each hop. A resolution never knowingly exceeds this by
/// more than one in-flight request's duration.
pub const MAX_TOTAL_TIME_MS: u64 = 25_000;
/// TCP connection timeout in seconds. Without it, connects to blackholed
/// hosts would eat the whole per-request budget before failing.
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// DNS query timeout in seconds. Most queries complete in under a second;
/// failing fast here keeps slow resolvers from dominating the hop budget.
pub const DNS_TIMEOUT_SECS: u64 = 3;

// Input limits
/// Maximum accepted URL length (2048 characters) to prevent DoS via
/// extremely long URLs. Matches common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

// Server defaults
/// Default port for the HTTP service.
pub const DEFAULT_PORT: u16 = 8080;

/// Default User-Agent string for outbound hop requests.
pub const DEFAULT_USER_AGENT: &str = concat!("hopguard/", env!("CARGO_PKG_VERSION"));
