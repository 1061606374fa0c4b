//! Redirect chain resolution.
//!
//! The client used here never follows redirects on its own; every hop is
//! fetched manually so the guard can vet each target before it is contacted
//! and the full chain can be reported hop by hop.

mod redirects;

pub use redirects::{Limits, RedirectResolver};
