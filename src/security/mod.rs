//! SSRF protection.
//!
//! This module decides whether a target may be contacted at all:
//! - `classify` holds the textual private-address rule set
//! - `guard` vets hostnames (literal or DNS-resolved) against it
//!
//! The guard is consulted before every hop of a redirect chain, not just the
//! first, and fails closed on any DNS uncertainty.

mod classify;
mod guard;

pub use classify::{is_private_address, AddrFamily, ClassifierRules};
pub use guard::HostnameGuard;
