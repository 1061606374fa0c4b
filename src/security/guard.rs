//! Hostname vetting against the private-address rules.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use log::{debug, warn};

use crate::dns::DnsLookup;
use crate::error_handling::GuardError;
use crate::security::classify::{is_private_address, AddrFamily, ClassifierRules};

/// Vets a hostname before any connection attempt is made to it.
///
/// A literal address is classified directly with no DNS lookup. A domain
/// name is resolved through the DNS collaborator and every returned address
/// must classify public: network stacks are free to connect to any record
/// in the set, so a single private record poisons the whole lookup. Lookup
/// failures and empty results are treated the same way (fail-closed).
pub struct HostnameGuard {
    rules: ClassifierRules,
    dns: Arc<dyn DnsLookup>,
}

impl HostnameGuard {
    /// Creates a guard over the given rule set and DNS collaborator.
    pub fn new(rules: ClassifierRules, dns: Arc<dyn DnsLookup>) -> Self {
        Self { rules, dns }
    }

    /// Succeeds silently if the hostname may be contacted; fails closed
    /// otherwise.
    ///
    /// Accepts the host as it appears in a URL, including the bracketed
    /// IPv6 form (`[::1]`).
    pub async fn ensure_public(&self, host: &str) -> Result<(), GuardError> {
        let bare = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);

        if bare.parse::<Ipv4Addr>().is_ok() {
            return self.vet(bare, bare, AddrFamily::V4);
        }
        if bare.parse::<Ipv6Addr>().is_ok() {
            return self.vet(bare, bare, AddrFamily::V6);
        }

        let addrs = self
            .dns
            .lookup_all(bare)
            .await
            .map_err(|e| GuardError::Resolution {
                host: bare.to_string(),
                reason: e.to_string(),
            })?;
        if addrs.is_empty() {
            return Err(GuardError::Resolution {
                host: bare.to_string(),
                reason: "lookup returned no addresses".to_string(),
            });
        }
        debug!("'{bare}' resolved to {} address(es)", addrs.len());
        for addr in &addrs {
            self.vet(bare, &addr.address, addr.family)?;
        }
        Ok(())
    }

    fn vet(&self, host: &str, address: &str, family: AddrFamily) -> Result<(), GuardError> {
        if is_private_address(&self.rules, address, family) {
            warn!("SSRF guard blocked '{host}': private address {address}");
            return Err(GuardError::PrivateAddress {
                host: host.to_string(),
                address: address.to_string(),
            });
        }
        Ok(())
    }
}
