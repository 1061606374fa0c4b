//! hopguard library: guarded HTTP redirect resolution.
//!
//! This library follows redirect chains hop by hop, vetting every target
//! against an SSRF guard before it is contacted, and reports the full chain
//! along with the final destination. The HTTP surface lives in the binary;
//! the resolver itself can be embedded directly.
//!
//! # Example
//!
//! ```no_run
//! use hopguard::{run_service, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     port: 8080,
//!     ..Default::default()
//! };
//! run_service(config).await
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod config;
mod dns;
mod error_handling;
mod fetch;
pub mod initialization;
mod models;
mod security;
pub mod server;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use dns::{DnsLookup, ResolvedAddr, SystemDns};
pub use error_handling::{GuardError, InitializationError, LookupError, ResolveError};
pub use fetch::{Limits, RedirectResolver};
pub use models::{Hop, Note, Resolution};
pub use run::run_service;
pub use security::{is_private_address, AddrFamily, ClassifierRules, HostnameGuard};

// Internal run module (wires the pieces together and serves)
mod run {
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use log::info;

    use crate::config::Config;
    use crate::dns::SystemDns;
    use crate::fetch::{Limits, RedirectResolver};
    use crate::initialization::{init_redirect_client, init_resolver};
    use crate::security::{ClassifierRules, HostnameGuard};
    use crate::server::start_server;

    /// Starts the resolution service and serves until the process exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the service
    /// port cannot be bound.
    pub async fn run_service(config: Config) -> Result<()> {
        let client = init_redirect_client(&config).context("Failed to build HTTP client")?;
        let dns = Arc::new(SystemDns::new(init_resolver()));

        let rules = ClassifierRules::with_extra(&config.block_prefixes);
        if !config.block_prefixes.is_empty() {
            info!(
                "blocking {} extra prefix(es) beyond the defaults",
                config.block_prefixes.len()
            );
        }
        let guard = HostnameGuard::new(rules, dns);

        let limits = Limits {
            // A zero hop cap would reject everything; clamp to one.
            max_hops: config.max_hops.max(1),
            request_timeout: Duration::from_millis(config.request_timeout_ms),
            total_budget: Duration::from_millis(config.total_budget_ms),
        };
        let resolver = Arc::new(RedirectResolver::new(client, guard, limits));

        start_server(config.port, resolver).await
    }
}
