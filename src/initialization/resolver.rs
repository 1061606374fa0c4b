//! DNS resolver initialization.

use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_TIMEOUT_SECS;

/// Builds the DNS resolver used to vet hostnames.
///
/// Uses the default resolver configuration with aggressive timeouts so a
/// slow or unresponsive DNS server cannot stall a resolution; the guard
/// treats timeouts as block-worthy anyway.
pub fn init_resolver() -> TokioAsyncResolver {
    use hickory_resolver::config::{ResolverConfig, ResolverOpts};

    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = 2;
    // ndots 0 prevents search domain appending
    opts.ndots = 0;

    TokioAsyncResolver::tokio(ResolverConfig::default(), opts)
}
