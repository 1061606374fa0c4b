//! DNS resolution.
//!
//! The guard depends on the [`DnsLookup`] trait rather than a concrete
//! resolver so that classification policy can be tested without the
//! network. [`SystemDns`] is the production implementation, backed by
//! `hickory-resolver`.

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use std::net::IpAddr;

use crate::error_handling::LookupError;
use crate::security::AddrFamily;

/// One address returned by a lookup, in textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddr {
    /// The address rendered as text (dotted quad or RFC 5952 IPv6).
    pub address: String,
    /// Which family the address belongs to.
    pub family: AddrFamily,
}

/// Resolves a hostname to the complete set of its addresses.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// Returns every A and AAAA record for the host.
    ///
    /// An `Ok` result may be empty; callers decide what an empty set means.
    async fn lookup_all(&self, host: &str) -> Result<Vec<ResolvedAddr>, LookupError>;
}

/// Production lookup over the system resolver configuration.
pub struct SystemDns {
    resolver: TokioAsyncResolver,
}

impl SystemDns {
    /// Wraps a configured resolver.
    pub fn new(resolver: TokioAsyncResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DnsLookup for SystemDns {
    async fn lookup_all(&self, host: &str) -> Result<Vec<ResolvedAddr>, LookupError> {
        let lookup = self
            .resolver
            .lookup_ip(host)
            .await
            .map_err(|e| LookupError(e.to_string()))?;
        Ok(lookup
            .iter()
            .map(|ip| ResolvedAddr {
                address: ip.to_string(),
                family: match ip {
                    IpAddr::V4(_) => AddrFamily::V4,
                    IpAddr::V6(_) => AddrFamily::V6,
                },
            })
            .collect())
    }
}
