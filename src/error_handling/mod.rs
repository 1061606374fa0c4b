//! Error handling.
//!
//! This module provides the typed errors used throughout the service:
//! - Guard failures (private address, DNS fail-closed)
//! - Resolution failures with their HTTP-equivalent status codes
//! - Initialization failures
//!
//! Soft terminations (loop detected, malformed `Location`, hop cap) are NOT
//! errors; they are reported as successful resolutions with an advisory note.

mod types;

// Re-export public API
pub use types::{GuardError, InitializationError, LookupError, ResolveError};
